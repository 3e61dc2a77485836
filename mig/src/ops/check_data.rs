//! Check-data operation - change table validation.

use matmig_data::ChangeData;

use crate::reports::{BoundaryInfo, CheckDataReport};

/// Validate `data` at every version boundary.
pub fn check_data(data: &ChangeData, source: &str) -> CheckDataReport {
    let errors: Vec<String> = data
        .audit()
        .into_iter()
        .map(|e| format!("{:?}", miette::Report::new(*e)))
        .collect();

    let boundaries = if errors.is_empty() {
        data.version_boundaries()
            .into_iter()
            .filter_map(|version| {
                let active = data.resolve(&version).ok()?;
                Some(BoundaryInfo {
                    version,
                    renames: active.rename_count(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    CheckDataReport {
        source: source.to_string(),
        boundaries,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_data_is_valid() {
        let data = ChangeData::builtin().unwrap();
        let report = check_data(&data, "built-in change data");
        assert!(report.is_valid(), "{:#?}", report.errors);
        assert_eq!(report.boundaries.len(), data.version_boundaries().len());
        assert!(report.boundaries.iter().all(|b| b.renames > 0));
    }
}
