//! The in-memory catalog of a view and the gate that decides which fetch
//! response is allowed to populate it.

use crate::collate::{collation_key, sort_by_name};
use crate::country::Country;

/// Records for one view, sorted by display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    countries: Vec<Country>,
}

impl Catalog {
    pub fn from_records(mut countries: Vec<Country>) -> Self {
        sort_by_name(&mut countries);
        Self { countries }
    }

    pub fn as_slice(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Index of the record whose name matches ignoring case and accents.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        let wanted = collation_key(name);
        self.countries
            .iter()
            .position(|country| collation_key(country.display_name()) == wanted)
    }
}

/// Ticket for one in-flight catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Last-request-wins arbitration between overlapping catalog fetches.
///
/// Every fetch takes a ticket before it starts; when its response arrives it
/// may only be applied if its ticket is still the newest one. Closing the gate
/// (view teardown) rejects every outstanding ticket.
#[derive(Debug, Clone, Default)]
pub struct FetchGate {
    latest: u64,
    closed: bool,
}

impl FetchGate {
    pub fn issue(&mut self) -> FetchTicket {
        self.latest += 1;
        FetchTicket(self.latest)
    }

    pub fn accepts(&self, ticket: FetchTicket) -> bool {
        !self.closed && ticket.0 == self.latest
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            Country::named("Peru"),
            Country::named("China"),
            Country::named("Réunion"),
            Country::named("Chile"),
        ])
    }

    #[test]
    fn test_from_records_sorts_by_name() {
        let catalog = catalog();

        let names: Vec<&str> = catalog.as_slice().iter().map(|c| c.display_name()).collect();

        assert_eq!(names, vec!["Chile", "China", "Peru", "Réunion"]);
    }

    #[test]
    fn test_position_of_ignores_case_and_accents() {
        let catalog = catalog();

        assert_eq!(catalog.position_of("reunion"), Some(3));
        assert_eq!(catalog.position_of("CHINA"), Some(1));
        assert_eq!(catalog.position_of("Atlantis"), None);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();

        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.as_slice().is_empty());
    }

    #[test]
    fn test_gate_last_request_wins() {
        let mut gate = FetchGate::default();

        let first = gate.issue();
        let second = gate.issue();

        assert!(!gate.accepts(first));
        assert!(gate.accepts(second));
    }

    #[test]
    fn test_gate_closed_rejects_everything() {
        let mut gate = FetchGate::default();
        let ticket = gate.issue();

        gate.close();

        assert!(!gate.accepts(ticket));
        let late = gate.issue();
        assert!(!gate.accepts(late));
    }
}
