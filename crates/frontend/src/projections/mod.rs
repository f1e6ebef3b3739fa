pub mod p900_balance;
