//! Exit codes for the CLI
//!
//! Standard exit codes used by orglens so scheduled audits can alert on
//! findings.
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Audit completed, no foreign collaborators |
//! | 1 | `FOREIGN_FOUND` | Findings | A repository or fork has a collaborator outside the organization |
//! | 3 | `ERROR` | Runtime error | Network error, unexpected status, cache write failure |
//! | 4 | `CONFIG_ERROR` | Configuration error | Missing token or organization, invalid config file |

/// Success - the audit found nothing, or the command completed normally.
pub const SUCCESS: i32 = 0;

/// At least one collaborator outside the organization was found.
///
/// Shield mode does not change this code.
pub const FOREIGN_FOUND: i32 = 1;

/// Runtime error (network error, unexpected status, cache I/O, etc.).
pub const ERROR: i32 = 3;

/// Configuration error, raised before any network access.
///
/// Used when:
/// - `GITHUB_TOKEN` is unset or blank
/// - No organization was given on the command line or in `ORGANIZATION`
/// - The configuration file cannot be read or parsed
pub const CONFIG_ERROR: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [SUCCESS, FOREIGN_FOUND, ERROR, CONFIG_ERROR];
        for i in 0..codes.len() {
            for j in (i + 1)..codes.len() {
                assert_ne!(
                    codes[i], codes[j],
                    "Exit codes should be unique: {} and {} are both {}",
                    i, j, codes[i]
                );
            }
        }
    }

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(FOREIGN_FOUND, 1);
        assert_eq!(ERROR, 3);
        assert_eq!(CONFIG_ERROR, 4);
    }
}
