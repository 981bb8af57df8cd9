//! Account path specifiers of the form `wallet[/account]`.

use crate::errors::CliError;

/// Splits a path into wallet and account names.
///
/// A path without `/`, or with a trailing `/`, names the wallet only and
/// yields an empty account name.
pub fn wallet_and_account_names(path: &str) -> Result<(&str, &str), CliError> {
    if path.is_empty() {
        return Err(CliError::InvalidAccountFormat);
    }
    match path.find('/') {
        None => Ok((path, "")),
        Some(index) => Ok((&path[..index], &path[index + 1..])),
    }
}
