//! Built-in template definitions, embedded at compile time with
//! `include_str!()`.
//!
//! Registry order matters: it breaks detection ties and the first FMEA
//! template is the fallback layout.

// =============================================================================
// Process FMEA
// =============================================================================

/// AIAG-VDA PFMEA, positional bindings over columns B..AG.
pub const PFMEA_AIAG_VDA_R1: &str = include_str!("../../templates/pfmea-aiag-vda-r1.json");

/// AIAG-VDA PFMEA, label bindings for revisions with shifted columns.
pub const PFMEA_AIAG_VDA_R2: &str = include_str!("../../templates/pfmea-aiag-vda-r2.json");

// =============================================================================
// Control Plan
// =============================================================================

/// Control Plan REV.04 layout.
pub const CONTROL_PLAN_REV04: &str = include_str!("../../templates/control-plan-rev04.json");

/// All built-ins in registry order.
pub const BUILTIN_TEMPLATES: &[&str] = &[PFMEA_AIAG_VDA_R1, PFMEA_AIAG_VDA_R2, CONTROL_PLAN_REV04];
