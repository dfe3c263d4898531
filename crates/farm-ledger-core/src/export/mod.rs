//! Export of farm records for backup and sharing.

mod schedule;
mod snapshot;

pub use schedule::*;
pub use snapshot::*;

/// Escape a string for CSV output.
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("Pune"), "Pune");
        assert_eq!(escape_csv("Village Khandala, Pune"), "\"Village Khandala, Pune\"");
        assert_eq!(escape_csv("Dr. \"Ram\""), "\"Dr. \"\"Ram\"\"\"");
    }
}
