//! Built-in seed templates.
//!
//! These are the guided tasks the product ships with. They are installed
//! by the storage migration step the first time a data directory is
//! initialized, and carry fixed ids so re-running the migration against
//! an already-seeded store replaces rather than duplicates them.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use super::template::{
    Category, Complexity, DisplayMeta, ExpectedOutput, InputKind, OutputFormat, OutputKind,
    StepInputDef, StepType, WorkflowStep, WorkflowTemplate,
};

/// Fixed id for the client-alert template.
pub const CLIENT_ALERT_ID: Uuid = Uuid::from_u128(0xca5e_f10a_0000_0000_0000_0000_0000_0001);
/// Fixed id for the engagement-letter template.
pub const ENGAGEMENT_LETTER_ID: Uuid = Uuid::from_u128(0xca5e_f10a_0000_0000_0000_0000_0000_0002);
/// Fixed id for the trademark-screening template.
pub const TRADEMARK_SCREENING_ID: Uuid =
    Uuid::from_u128(0xca5e_f10a_0000_0000_0000_0000_0000_0003);

fn seed_timestamps() -> chrono::DateTime<Utc> {
    // Fixed creation time so seeded templates compare equal across runs.
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now)
}

/// All built-in templates, in seed order.
pub fn builtin_templates() -> Vec<WorkflowTemplate> {
    vec![
        client_alert_template(),
        engagement_letter_template(),
        trademark_screening_template(),
    ]
}

/// "Draft a Client Alert": upload source material, run risk analysis,
/// generate the alert, review before sending.
pub fn client_alert_template() -> WorkflowTemplate {
    let ts = seed_timestamps();
    WorkflowTemplate {
        id: CLIENT_ALERT_ID,
        title: "Draft a Client Alert".to_string(),
        description: "Turn a regulatory development or court decision into a \
                      client-ready alert with risk analysis."
            .to_string(),
        category: Category::ClientCommunication,
        steps: vec![
            WorkflowStep {
                id: "upload-source".to_string(),
                name: "Upload source material".to_string(),
                description: "Upload the decision, rule, or guidance the alert covers."
                    .to_string(),
                step_type: StepType::Upload,
                order: 0,
                inputs: vec![StepInputDef {
                    id: "source-document".to_string(),
                    label: "Source document".to_string(),
                    description: "PDF or Word copy of the underlying material".to_string(),
                    kind: InputKind::File {
                        accepted_extensions: vec![
                            "pdf".to_string(),
                            "docx".to_string(),
                            "txt".to_string(),
                        ],
                        max_size_bytes: Some(25 * 1024 * 1024),
                    },
                    required: true,
                }],
                expected_outputs: vec![],
                estimated_minutes: 5,
                optional: false,
                dependencies: vec![],
            },
            WorkflowStep {
                id: "risk-analysis".to_string(),
                name: "Analyze client impact".to_string(),
                description: "Identify affected client groups and flag risk areas."
                    .to_string(),
                step_type: StepType::Analysis,
                order: 1,
                inputs: vec![StepInputDef {
                    id: "practice-area".to_string(),
                    label: "Practice area".to_string(),
                    description: String::new(),
                    kind: InputKind::Selection {
                        options: vec![
                            "Employment".to_string(),
                            "Privacy & Data".to_string(),
                            "Securities".to_string(),
                            "Intellectual Property".to_string(),
                        ],
                    },
                    required: true,
                }],
                expected_outputs: vec![ExpectedOutput {
                    name: "Risk analysis report".to_string(),
                    kind: OutputKind::Analysis,
                    format: OutputFormat::Markdown,
                }],
                estimated_minutes: 15,
                optional: false,
                dependencies: vec!["upload-source".to_string()],
            },
            WorkflowStep {
                id: "draft-alert".to_string(),
                name: "Generate the alert".to_string(),
                description: "Produce a first draft tailored to the chosen audience and tone."
                    .to_string(),
                step_type: StepType::Generation,
                order: 2,
                inputs: vec![
                    StepInputDef {
                        id: "audience".to_string(),
                        label: "Audience".to_string(),
                        description: "Who the alert is addressed to".to_string(),
                        kind: InputKind::Text {
                            placeholder: Some("e.g. General counsel of mid-size employers".to_string()),
                        },
                        required: true,
                    },
                    StepInputDef {
                        id: "urgent".to_string(),
                        label: "Mark as time-sensitive".to_string(),
                        description: String::new(),
                        kind: InputKind::Boolean,
                        required: false,
                    },
                ],
                expected_outputs: vec![ExpectedOutput {
                    name: "Alert draft".to_string(),
                    kind: OutputKind::Document,
                    format: OutputFormat::Markdown,
                }],
                estimated_minutes: 20,
                optional: false,
                dependencies: vec!["risk-analysis".to_string()],
            },
            WorkflowStep {
                id: "final-review".to_string(),
                name: "Review and approve".to_string(),
                description: "Partner review of the draft before distribution.".to_string(),
                step_type: StepType::Review,
                order: 3,
                inputs: vec![],
                expected_outputs: vec![],
                estimated_minutes: 10,
                optional: false,
                dependencies: vec!["draft-alert".to_string()],
            },
        ],
        estimated_minutes: 50,
        display: DisplayMeta {
            icon: "bell".to_string(),
            color: "#2563eb".to_string(),
            tags: vec!["alerts".to_string(), "client".to_string()],
        },
        complexity: Complexity::Moderate,
        version: "1.0.0".to_string(),
        is_active: true,
        created_at: ts,
        updated_at: ts,
    }
}

/// "Prepare an Engagement Letter": intake details, generate, review.
pub fn engagement_letter_template() -> WorkflowTemplate {
    let ts = seed_timestamps();
    WorkflowTemplate {
        id: ENGAGEMENT_LETTER_ID,
        title: "Prepare an Engagement Letter".to_string(),
        description: "Collect matter details and produce an engagement letter \
                      from the firm's standard terms."
            .to_string(),
        category: Category::MatterIntake,
        steps: vec![
            WorkflowStep {
                id: "matter-details".to_string(),
                name: "Enter matter details".to_string(),
                description: "Client name, matter description, and fee arrangement."
                    .to_string(),
                step_type: StepType::Input,
                order: 0,
                inputs: vec![
                    StepInputDef {
                        id: "client-name".to_string(),
                        label: "Client name".to_string(),
                        description: String::new(),
                        kind: InputKind::Text { placeholder: None },
                        required: true,
                    },
                    StepInputDef {
                        id: "fee-arrangement".to_string(),
                        label: "Fee arrangement".to_string(),
                        description: String::new(),
                        kind: InputKind::Selection {
                            options: vec![
                                "Hourly".to_string(),
                                "Flat fee".to_string(),
                                "Contingency".to_string(),
                            ],
                        },
                        required: true,
                    },
                    StepInputDef {
                        id: "effective-date".to_string(),
                        label: "Effective date".to_string(),
                        description: String::new(),
                        kind: InputKind::Date,
                        required: false,
                    },
                ],
                expected_outputs: vec![],
                estimated_minutes: 10,
                optional: false,
                dependencies: vec![],
            },
            WorkflowStep {
                id: "generate-letter".to_string(),
                name: "Generate the letter".to_string(),
                description: "Merge matter details into the standard engagement terms."
                    .to_string(),
                step_type: StepType::Generation,
                order: 1,
                inputs: vec![],
                expected_outputs: vec![ExpectedOutput {
                    name: "Engagement letter".to_string(),
                    kind: OutputKind::Document,
                    format: OutputFormat::Html,
                }],
                estimated_minutes: 5,
                optional: false,
                dependencies: vec!["matter-details".to_string()],
            },
            WorkflowStep {
                id: "review-letter".to_string(),
                name: "Review the letter".to_string(),
                description: String::new(),
                step_type: StepType::Review,
                order: 2,
                inputs: vec![],
                expected_outputs: vec![],
                estimated_minutes: 10,
                optional: false,
                dependencies: vec!["generate-letter".to_string()],
            },
        ],
        estimated_minutes: 25,
        display: DisplayMeta {
            icon: "file-signature".to_string(),
            color: "#059669".to_string(),
            tags: vec!["intake".to_string(), "letters".to_string()],
        },
        complexity: Complexity::Simple,
        version: "1.0.0".to_string(),
        is_active: true,
        created_at: ts,
        updated_at: ts,
    }
}

/// "Trademark Screening Search": define the mark, run the search,
/// analyze conflicts, summarize.
pub fn trademark_screening_template() -> WorkflowTemplate {
    let ts = seed_timestamps();
    WorkflowTemplate {
        id: TRADEMARK_SCREENING_ID,
        title: "Trademark Screening Search".to_string(),
        description: "Screen a proposed mark against registered and pending \
                      marks and summarize conflict risk."
            .to_string(),
        category: Category::IpPortfolio,
        steps: vec![
            WorkflowStep {
                id: "define-mark".to_string(),
                name: "Define the mark".to_string(),
                description: "The proposed mark and the goods/services it covers."
                    .to_string(),
                step_type: StepType::Input,
                order: 0,
                inputs: vec![
                    StepInputDef {
                        id: "mark-text".to_string(),
                        label: "Proposed mark".to_string(),
                        description: String::new(),
                        kind: InputKind::Text {
                            placeholder: Some("e.g. NORTHWIND".to_string()),
                        },
                        required: true,
                    },
                    StepInputDef {
                        id: "include-pending".to_string(),
                        label: "Include pending applications".to_string(),
                        description: String::new(),
                        kind: InputKind::Boolean,
                        required: false,
                    },
                ],
                expected_outputs: vec![],
                estimated_minutes: 5,
                optional: false,
                dependencies: vec![],
            },
            WorkflowStep {
                id: "run-search".to_string(),
                name: "Run the screening search".to_string(),
                description: "Query the register for identical and confusingly similar marks."
                    .to_string(),
                step_type: StepType::Analysis,
                order: 1,
                inputs: vec![],
                expected_outputs: vec![ExpectedOutput {
                    name: "Search hits".to_string(),
                    kind: OutputKind::Analysis,
                    format: OutputFormat::Json,
                }],
                estimated_minutes: 10,
                optional: false,
                dependencies: vec!["define-mark".to_string()],
            },
            WorkflowStep {
                id: "conflict-summary".to_string(),
                name: "Summarize conflicts".to_string(),
                description: "Plain-language summary of conflict risk for the client."
                    .to_string(),
                step_type: StepType::Generation,
                order: 2,
                inputs: vec![],
                expected_outputs: vec![ExpectedOutput {
                    name: "Conflict summary".to_string(),
                    kind: OutputKind::Summary,
                    format: OutputFormat::Markdown,
                }],
                estimated_minutes: 15,
                optional: false,
                dependencies: vec!["run-search".to_string()],
            },
        ],
        estimated_minutes: 30,
        display: DisplayMeta {
            icon: "trademark".to_string(),
            color: "#7c3aed".to_string(),
            tags: vec!["trademark".to_string(), "search".to_string()],
        },
        complexity: Complexity::Complex,
        version: "1.0.0".to_string(),
        is_active: true,
        created_at: ts,
        updated_at: ts,
    }
}
