//! Column-function ciphers.
//!
//! An encrypted column has to be decrypted in SQL before it can be ordered.
//! The manager is owned by the application; order-by elements only keep a
//! weak reference to it.

use std::sync::Arc;

/// Encrypts/decrypts a column expression with database functions
pub trait ColumnFunctionCipher: Send + Sync {
    fn encrypt(&self, value_expr: &str) -> String;
    fn decrypt(&self, value_expr: &str) -> String;
}

/// Finds the cipher of a column, if it has one
pub trait GearedCipherManager: Send + Sync {
    fn find_cipher(
        &self,
        table_db_name: &str,
        column_db_name: &str,
    ) -> Option<Arc<dyn ColumnFunctionCipher>>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    pub struct AesCipher;

    impl ColumnFunctionCipher for AesCipher {
        fn encrypt(&self, value_expr: &str) -> String {
            format!("encrypt_aes({value_expr})")
        }

        fn decrypt(&self, value_expr: &str) -> String {
            format!("decrypt_aes({value_expr})")
        }
    }

    /// Ciphers exactly one column.
    pub struct SingleColumnCipherManager {
        pub table_db_name: &'static str,
        pub column_db_name: &'static str,
    }

    impl GearedCipherManager for SingleColumnCipherManager {
        fn find_cipher(
            &self,
            table_db_name: &str,
            column_db_name: &str,
        ) -> Option<Arc<dyn ColumnFunctionCipher>> {
            if table_db_name == self.table_db_name && column_db_name == self.column_db_name {
                Some(Arc::new(AesCipher))
            } else {
                None
            }
        }
    }
}
