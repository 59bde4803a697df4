use serde::Deserialize;

/// Optional trip search terms. Each present, non-empty term narrows the result
/// to trips whose matching column contains it, ignoring case.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TripFilter {
    pub o_state: Option<String>,
    pub o_city: Option<String>,
    pub d_state: Option<String>,
    pub d_city: Option<String>,
}

impl TripFilter {
    /// (column, needle) pairs for every term that takes part in the search.
    pub(crate) fn active_filters(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("os.name", &self.o_state),
            ("oc.name", &self.o_city),
            ("ds.name", &self.d_state),
            ("dc.name", &self.d_city),
        ]
        .into_iter()
        .filter_map(|(column, term)| match term.as_deref() {
            Some(needle) if !needle.is_empty() => Some((column, needle)),
            _ => None,
        })
    }
}
