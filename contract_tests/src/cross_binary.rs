//! End-to-end scenarios through the C-ABI boundary.
//!
//! The bridge targets are process-wide and set at most once, so every test
//! in this binary shares one configuration: an echoing MdmServer and a
//! recording PluginHost. Tests key their assertions by handler id or event
//! name to stay independent of each other.
