pub mod cryptowatch;
