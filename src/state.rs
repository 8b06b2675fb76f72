use url::form_urlencoded;

use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Selection – the per-request filter state
// ---------------------------------------------------------------------------

/// What the user has picked in the two dashboard selectors. Rebuilt from the
/// query string on every request; nothing is remembered between requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Selected region labels, in request order. Empty means nothing
    /// selected, which renders an empty chart and table.
    pub regions: Vec<String>,
    /// Selected year labels, in request order. Empty means "all years".
    pub years: Vec<String>,
}

impl Selection {
    /// Parse a raw query string (`regions=North&regions=South&years=2012`).
    ///
    /// Repeated keys accumulate in order, percent- and plus-encoding are
    /// decoded, blank values and unknown keys are dropped.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut selection = Selection::default();
        let Some(query) = query else {
            return selection;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "regions" => selection.regions.push(value.into_owned()),
                "years" => selection.years.push(value.into_owned()),
                _ => {}
            }
        }
        selection
    }

    /// The year columns the table view should show: the selected years, or
    /// every year column when none are selected.
    pub fn effective_years(&self, table: &Table) -> Vec<String> {
        if self.years.is_empty() {
            table.years.clone()
        } else {
            self.years.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Table;

    #[test]
    fn parses_repeated_keys_in_order() {
        let s = Selection::from_query(Some("regions=South&regions=North&years=2012"));
        assert_eq!(s.regions, vec!["South", "North"]);
        assert_eq!(s.years, vec!["2012"]);
    }

    #[test]
    fn decodes_percent_and_plus_encoding() {
        let s = Selection::from_query(Some("regions=Baja+California&regions=Quer%C3%A9taro"));
        assert_eq!(s.regions, vec!["Baja California", "Querétaro"]);
    }

    #[test]
    fn ignores_blank_values_and_unknown_keys() {
        let s = Selection::from_query(Some("regions=&years=2011&page=2"));
        assert!(s.regions.is_empty());
        assert_eq!(s.years, vec!["2011"]);
    }

    #[test]
    fn no_query_means_nothing_selected() {
        assert_eq!(Selection::from_query(None), Selection::default());
    }

    #[test]
    fn empty_year_selection_falls_back_to_all_years() {
        let table = Table::new(Vec::new());
        let all = Selection::default().effective_years(&table);
        assert_eq!(all, table.years);

        let some = Selection {
            regions: Vec::new(),
            years: vec!["2012".into()],
        };
        assert_eq!(some.effective_years(&table), vec!["2012"]);
    }
}
