//! Dynamic filtering over photos.
//!
//! A [`SpecSearchCriteria`](search_criteria::SpecSearchCriteria) describes one
//! filter, [`PhotoSpecification`](photo_specification::PhotoSpecification)
//! turns it into a `Condition`, and
//! [`SpecificationsBuilder`](specifications_builder::SpecificationsBuilder)
//! folds several of them into the predicate handed to the photo service.

pub mod photo_field;
pub mod photo_specification;
pub mod search_criteria;
pub mod search_operation;
pub mod specifications_builder;
