//! Business logic that spans more than one repository

pub mod accounts;
pub mod stats;
pub mod upload;
