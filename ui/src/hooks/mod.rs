pub mod use_balance_updates;
