pub mod crypto_helper;
