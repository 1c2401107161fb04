mod completion_tests;
