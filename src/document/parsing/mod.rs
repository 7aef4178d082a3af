//! Document parsing utilities
//!
//! This module contains the decoding steps applied to an opened container:
//! text extraction from the WordprocessingML parts and staging of embedded
//! media.

pub(crate) mod media;
pub(crate) mod text;
