pub mod navigation_tests;
