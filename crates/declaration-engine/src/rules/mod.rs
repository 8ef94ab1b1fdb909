pub mod conformance;
pub mod declaration_link;
