//! Canonical field names.
//!
//! Templates bind these names to worksheet columns; records are keyed by
//! them. Process FMEA names come first, followed by the Control Plan set.

/// Key under which a record serializes its worksheet row. Reserved.
pub const ROW_INDEX: &str = "row_index";

// === Structure, function and failure analysis ===
pub const ISSUE_NO: &str = "issue_no";
pub const PROCESS_ITEM: &str = "process_item";
pub const PROCESS_STEP: &str = "process_step";
pub const PROCESS_WORK_ELEMENT: &str = "process_work_element";
pub const FUNCTION_OF_PROCESS_ITEM: &str = "function_of_process_item";
pub const FUNCTION_OF_PROCESS_STEP: &str = "function_of_process_step_and_product_characteristic";
pub const FUNCTION_OF_WORK_ELEMENT: &str =
    "function_of_process_work_element_and_process_characteristic";
pub const FAILURE_EFFECTS_DESCRIPTION: &str = "failure_effects_description";
pub const SEVERITY: &str = "severity";
pub const FAILURE_MODE: &str = "failure_mode";
pub const FAILURE_CAUSE: &str = "failure_cause";

// === Risk analysis ===
pub const PREVENTION_CONTROLS_DESCRIPTION: &str = "prevention_controls_description";
pub const OCCURRENCE: &str = "occurrence";
pub const DETECTION_CONTROLS: &str = "detection_controls";
pub const DETECTION: &str = "detection";
pub const AP: &str = "ap";
pub const SPECIAL_CHARACTERISTICS: &str = "special_characteristics";
pub const FILTER_CODE: &str = "filter_code";

// === Optimization ===
pub const PREVENTION_ACTION: &str = "prevention_action";
pub const DETECTION_ACTION: &str = "detection_action";
pub const RESPONSIBLE_PERSON_NAME: &str = "responsible_person_name";
pub const TARGET_COMPLETION_DATE: &str = "target_completion_date";
pub const STATUS: &str = "status";
pub const ACTION_TAKEN: &str = "action_taken";
pub const COMPLETION_DATE: &str = "completion_date";
pub const SEVERITY_OPT: &str = "severity_opt";
pub const OCCURRENCE_OPT: &str = "occurrence_opt";
pub const DETECTION_OPT: &str = "detection_opt";
pub const AP_OPT: &str = "ap_opt";
pub const SPECIAL_CHARACTERISTICS_OPT: &str = "special_characteristics_opt";
pub const REMARKS: &str = "remarks";

/// Every field a Process FMEA record exposes, in worksheet order.
pub const FMEA_FIELDS: &[&str] = &[
    ISSUE_NO,
    PROCESS_ITEM,
    PROCESS_STEP,
    PROCESS_WORK_ELEMENT,
    FUNCTION_OF_PROCESS_ITEM,
    FUNCTION_OF_PROCESS_STEP,
    FUNCTION_OF_WORK_ELEMENT,
    FAILURE_EFFECTS_DESCRIPTION,
    SEVERITY,
    FAILURE_MODE,
    FAILURE_CAUSE,
    PREVENTION_CONTROLS_DESCRIPTION,
    OCCURRENCE,
    DETECTION_CONTROLS,
    DETECTION,
    AP,
    SPECIAL_CHARACTERISTICS,
    FILTER_CODE,
    PREVENTION_ACTION,
    DETECTION_ACTION,
    RESPONSIBLE_PERSON_NAME,
    TARGET_COMPLETION_DATE,
    STATUS,
    ACTION_TAKEN,
    COMPLETION_DATE,
    SEVERITY_OPT,
    OCCURRENCE_OPT,
    DETECTION_OPT,
    AP_OPT,
    SPECIAL_CHARACTERISTICS_OPT,
    REMARKS,
];

/// Ordinal 1-10 fields; nullable after coercion.
pub const RATING_FIELDS: &[&str] = &[
    SEVERITY,
    OCCURRENCE,
    DETECTION,
    SEVERITY_OPT,
    OCCURRENCE_OPT,
    DETECTION_OPT,
];

// === Control Plan ===
pub const PROCESS_NAME: &str = "process_name";
pub const PRODUCT_CHARACTERISTIC: &str = "product_characteristic";
pub const PROCESS_CHARACTERISTIC: &str = "process_characteristic";
pub const EVALUATION_TECHNIQUE: &str = "evaluation_technique";
pub const CONTROL_METHOD: &str = "control_method";
pub const SPEC_TOLERANCE: &str = "spec_tolerance";
pub const SAMPLE_SIZE: &str = "sample_size";
pub const SAMPLE_FREQ: &str = "sample_freq";
pub const SPECIAL_CHARACTER_CLASS: &str = "special_character_class";
pub const EQUIPMENT: &str = "equipment";
pub const REACTION_PLAN: &str = "reaction_plan";

pub const CONTROL_PLAN_FIELDS: &[&str] = &[
    PROCESS_NAME,
    PRODUCT_CHARACTERISTIC,
    PROCESS_CHARACTERISTIC,
    EVALUATION_TECHNIQUE,
    CONTROL_METHOD,
    SPEC_TOLERANCE,
    SAMPLE_SIZE,
    SAMPLE_FREQ,
    SPECIAL_CHARACTER_CLASS,
    EQUIPMENT,
    REACTION_PLAN,
];
