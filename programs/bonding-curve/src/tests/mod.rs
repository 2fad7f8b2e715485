mod trading_tests;
