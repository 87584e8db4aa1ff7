//! Patient intake form.
//!
//! Inputs are grouped into the four sections of the original screening page:
//! patient profile, clinical labs, lifestyle, and comorbidities. Numeric
//! fields are digit buffers with the intake defaults prefilled; categorical
//! fields cycle through their closed label sets, so only the label-to-enum
//! parse at submission can reject a value.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{
    AirPollutionExposure, AlcoholConsumption, DietaryHabits, EkgResult, EncodingError, Gender,
    IncomeLevel, PatientProfile, PhysicalActivity, Region, SmokingStatus, StressLevel,
};
use crate::tui::styles::HeartTheme;

const SEC_PROFILE: usize = 0;
const SEC_CLINICAL: usize = 1;
const SEC_LIFESTYLE: usize = 2;
const SEC_COMORBID: usize = 3;

const TOGGLE_LABELS: [&str; 2] = ["No", "Yes"];

/// Input widget backing one form field.
#[derive(Debug, Clone)]
pub enum FieldInput {
    /// Integer entry with intake-form bounds
    Numeric {
        buffer: String,
        min: u32,
        max: u32,
    },
    /// Selection from a closed label set
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    /// Model column name, used in error messages
    pub column: &'static str,
    pub hint: &'static str,
    pub input: FieldInput,
}

impl FormField {
    fn numeric(
        label: &'static str,
        column: &'static str,
        hint: &'static str,
        default: &str,
        min: u32,
        max: u32,
    ) -> Self {
        Self {
            label,
            column,
            hint,
            input: FieldInput::Numeric {
                buffer: default.to_string(),
                min,
                max,
            },
        }
    }

    fn choice(
        label: &'static str,
        column: &'static str,
        options: &'static [&'static str],
        selected: usize,
    ) -> Self {
        Self {
            label,
            column,
            hint: "",
            input: FieldInput::Choice { options, selected },
        }
    }

    fn toggle(label: &'static str, column: &'static str) -> Self {
        Self::choice(label, column, &TOGGLE_LABELS, 0)
    }

    /// Parse a numeric field's buffer against its bounds.
    fn numeric_value(&self) -> Result<u32, EncodingError> {
        match &self.input {
            FieldInput::Numeric { buffer, min, max } => {
                if buffer.is_empty() {
                    return Err(EncodingError::MissingValue { field: self.column });
                }
                let value: u32 = buffer
                    .parse()
                    .map_err(|_| EncodingError::InvalidNumber { field: self.column })?;
                if value < *min || value > *max {
                    return Err(EncodingError::OutOfRange {
                        field: self.column,
                        value: f64::from(value),
                        min: f64::from(*min),
                        max: f64::from(*max),
                    });
                }
                Ok(value)
            }
            FieldInput::Choice { .. } => {
                Err(EncodingError::InvalidNumber { field: self.column })
            }
        }
    }

    /// Current label of a choice field ("" for numeric fields, which no
    /// categorical parser accepts).
    fn label_value(&self) -> &'static str {
        match &self.input {
            FieldInput::Numeric { .. } => "",
            FieldInput::Choice { options, selected } => options[*selected],
        }
    }

    fn toggle_value(&self) -> Result<bool, EncodingError> {
        match self.label_value() {
            "Yes" => Ok(true),
            "No" => Ok(false),
            other => Err(EncodingError::unknown(self.column, other)),
        }
    }

    pub(crate) fn set_buffer(&mut self, value: &str) {
        if let FieldInput::Numeric { buffer, .. } = &mut self.input {
            *buffer = value.to_string();
        }
    }

    fn select_label(&mut self, label: &str) {
        if let FieldInput::Choice { options, selected } = &mut self.input {
            if let Some(i) = options.iter().position(|&o| o == label) {
                *selected = i;
            }
        }
    }
}

/// One titled group of fields.
#[derive(Debug, Clone)]
pub struct FormSection {
    pub title: &'static str,
    pub fields: Vec<FormField>,
}

/// Patient form state
pub struct PatientFormState {
    pub sections: Vec<FormSection>,
    pub section: usize,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        let sections = vec![
            FormSection {
                title: "Patient Profile",
                fields: vec![
                    FormField::numeric("Age", "age", "years (20-90)", "45", 20, 90),
                    FormField::choice("Gender", "gender", &Gender::LABELS, 0),
                    FormField::choice("Region", "region", &Region::LABELS, 0),
                    // Middle income is the intake default.
                    FormField::choice("Income Level", "income_level", &IncomeLevel::LABELS, 1),
                    FormField::toggle("Family History of Heart Disease", "family_history"),
                    FormField::toggle("Previous Heart Disease", "previous_heart_disease"),
                    FormField::toggle("On Heart Medication", "medication_usage"),
                ],
            },
            FormSection {
                title: "Clinical / Lab",
                fields: vec![
                    FormField::numeric(
                        "Systolic BP",
                        "blood_pressure_systolic",
                        "mmHg (90-220)",
                        "120",
                        90,
                        220,
                    ),
                    FormField::numeric(
                        "Diastolic BP",
                        "blood_pressure_diastolic",
                        "mmHg (60-140)",
                        "80",
                        60,
                        140,
                    ),
                    FormField::choice("EKG Result", "EKG_results", &EkgResult::LABELS, 0),
                    FormField::numeric(
                        "Total Cholesterol",
                        "cholesterol_level",
                        "mg/dL (100-400)",
                        "200",
                        100,
                        400,
                    ),
                    FormField::numeric(
                        "LDL Cholesterol",
                        "cholesterol_ldl",
                        "mg/dL (50-250)",
                        "100",
                        50,
                        250,
                    ),
                    FormField::numeric(
                        "HDL Cholesterol",
                        "cholesterol_hdl",
                        "mg/dL (20-100)",
                        "50",
                        20,
                        100,
                    ),
                    FormField::numeric(
                        "Fasting Blood Sugar",
                        "fasting_blood_sugar",
                        "mg/dL (70-300)",
                        "100",
                        70,
                        300,
                    ),
                    FormField::numeric(
                        "Triglycerides",
                        "triglycerides",
                        "mg/dL (50-400)",
                        "150",
                        50,
                        400,
                    ),
                    FormField::numeric(
                        "Waist Circumference",
                        "waist_circumference",
                        "cm (50-150)",
                        "80",
                        50,
                        150,
                    ),
                ],
            },
            FormSection {
                title: "Lifestyle & Environment",
                fields: vec![
                    FormField::choice(
                        "Smoking Status",
                        "smoking_status",
                        &SmokingStatus::LABELS,
                        0,
                    ),
                    FormField::choice(
                        "Alcohol Consumption",
                        "alcohol_consumption",
                        &AlcoholConsumption::LABELS,
                        0,
                    ),
                    FormField::choice("Diet", "dietary_habits", &DietaryHabits::LABELS, 0),
                    FormField::choice(
                        "Physical Activity",
                        "physical_activity",
                        &PhysicalActivity::LABELS,
                        0,
                    ),
                    FormField::choice("Stress Level", "stress_level", &StressLevel::LABELS, 0),
                    FormField::choice(
                        "Air Pollution Exposure",
                        "air_pollution_exposure",
                        &AirPollutionExposure::LABELS,
                        0,
                    ),
                    FormField::numeric("Sleep Hours", "sleep_hours", "per day (3-12)", "7", 3, 12),
                ],
            },
            FormSection {
                title: "Comorbidities",
                fields: vec![
                    FormField::toggle("Hypertension", "hypertension"),
                    FormField::toggle("Diabetes", "diabetes"),
                ],
            },
        ];

        Self {
            sections,
            section: 0,
            selected_field: 0,
            error_message: None,
        }
    }
}

impl PatientFormState {
    fn current_section(&self) -> &FormSection {
        &self.sections[self.section]
    }

    fn current_field_mut(&mut self) -> &mut FormField {
        let section = self.section;
        let field = self.selected_field;
        &mut self.sections[section].fields[field]
    }

    /// Move to the next field in the current section
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.current_section().fields.len();
    }

    /// Move to the previous field in the current section
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.current_section().fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Switch to the next section
    pub fn next_section(&mut self) {
        self.section = (self.section + 1) % self.sections.len();
        self.selected_field = 0;
    }

    /// Switch to the previous section
    pub fn prev_section(&mut self) {
        if self.section == 0 {
            self.section = self.sections.len() - 1;
        } else {
            self.section -= 1;
        }
        self.selected_field = 0;
    }

    /// Add a digit to the current numeric field
    pub fn input_char(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        if let FieldInput::Numeric { buffer, .. } = &mut self.current_field_mut().input {
            buffer.push(c);
        }
        self.error_message = None;
    }

    /// Delete the last character of the current numeric field
    pub fn delete_char(&mut self) {
        if let FieldInput::Numeric { buffer, .. } = &mut self.current_field_mut().input {
            buffer.pop();
        }
    }

    /// Clear the current numeric field
    pub fn clear_field(&mut self) {
        if let FieldInput::Numeric { buffer, .. } = &mut self.current_field_mut().input {
            buffer.clear();
        }
    }

    /// Cycle the current choice field backwards
    pub fn cycle_left(&mut self) {
        if let FieldInput::Choice { options, selected } = &mut self.current_field_mut().input {
            *selected = if *selected == 0 {
                options.len() - 1
            } else {
                *selected - 1
            };
            self.error_message = None;
        }
    }

    /// Cycle the current choice field forwards
    pub fn cycle_right(&mut self) {
        if let FieldInput::Choice { options, selected } = &mut self.current_field_mut().input {
            *selected = (*selected + 1) % options.len();
            self.error_message = None;
        }
    }

    /// Validate and convert the form into a typed patient profile.
    ///
    /// # Errors
    /// Returns the first `EncodingError` encountered, in field order.
    pub fn to_profile(&self) -> Result<PatientProfile, EncodingError> {
        let profile = &self.sections[SEC_PROFILE].fields;
        let clinical = &self.sections[SEC_CLINICAL].fields;
        let lifestyle = &self.sections[SEC_LIFESTYLE].fields;
        let comorbid = &self.sections[SEC_COMORBID].fields;

        Ok(PatientProfile {
            age: profile[0].numeric_value()?,
            gender: Gender::from_label(profile[1].label_value())?,
            region: Region::from_label(profile[2].label_value())?,
            income_level: IncomeLevel::from_label(profile[3].label_value())?,
            hypertension: comorbid[0].toggle_value()?,
            diabetes: comorbid[1].toggle_value()?,
            cholesterol_level: clinical[3].numeric_value()?,
            waist_circumference: clinical[8].numeric_value()?,
            family_history: profile[4].toggle_value()?,
            smoking_status: SmokingStatus::from_label(lifestyle[0].label_value())?,
            alcohol_consumption: AlcoholConsumption::from_label(lifestyle[1].label_value())?,
            physical_activity: PhysicalActivity::from_label(lifestyle[3].label_value())?,
            dietary_habits: DietaryHabits::from_label(lifestyle[2].label_value())?,
            air_pollution_exposure: AirPollutionExposure::from_label(lifestyle[5].label_value())?,
            stress_level: StressLevel::from_label(lifestyle[4].label_value())?,
            sleep_hours: lifestyle[6].numeric_value()?,
            blood_pressure_systolic: clinical[0].numeric_value()?,
            blood_pressure_diastolic: clinical[1].numeric_value()?,
            fasting_blood_sugar: clinical[6].numeric_value()?,
            cholesterol_hdl: clinical[5].numeric_value()?,
            cholesterol_ldl: clinical[4].numeric_value()?,
            triglycerides: clinical[7].numeric_value()?,
            ekg_results: EkgResult::from_label(clinical[2].label_value())?,
            previous_heart_disease: profile[5].toggle_value()?,
            medication_usage: profile[6].toggle_value()?,
        })
    }

    /// Load a representative high-risk sample (urban smoker with elevated
    /// lipids and short sleep) for demos and manual testing.
    pub fn load_sample_data(&mut self) {
        let profile = &mut self.sections[SEC_PROFILE].fields;
        profile[0].set_buffer("58");
        profile[1].select_label("Male");
        profile[2].select_label("Urban (Kota)");
        profile[3].select_label("Middle");
        profile[4].select_label("Yes");
        profile[5].select_label("No");
        profile[6].select_label("No");

        let clinical = &mut self.sections[SEC_CLINICAL].fields;
        clinical[0].set_buffer("152");
        clinical[1].set_buffer("96");
        clinical[2].select_label("Abnormal");
        clinical[3].set_buffer("228");
        clinical[4].set_buffer("142");
        clinical[5].set_buffer("38");
        clinical[6].set_buffer("132");
        clinical[7].set_buffer("210");
        clinical[8].set_buffer("104");

        let lifestyle = &mut self.sections[SEC_LIFESTYLE].fields;
        lifestyle[0].select_label("Current");
        lifestyle[1].select_label("Moderate");
        lifestyle[2].select_label("Unhealthy");
        lifestyle[3].select_label("Low");
        lifestyle[4].select_label("High");
        lifestyle[5].select_label("High");
        lifestyle[6].set_buffer("5");

        let comorbid = &mut self.sections[SEC_COMORBID].fields;
        comorbid[0].select_label("Yes");
        comorbid[1].select_label("Yes");

        self.error_message = None;
    }
}

/// Render the patient intake form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], state);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled(state.current_section().title, HeartTheme::title()),
        Span::styled(
            format!(" │ Section {}/{}", state.section + 1, state.sections.len()),
            HeartTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let fields = &state.current_section().fields;
    let mid = (fields.len() + 1) / 2;

    render_field_column(f, columns[0], &fields[..mid], 0, state.selected_field);
    render_field_column(f, columns[1], &fields[mid..], mid, state.selected_field);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            HeartTheme::border_focused()
        } else {
            HeartTheme::border()
        };

        let title_style = if is_selected {
            HeartTheme::focused()
        } else {
            HeartTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = match &field.input {
            FieldInput::Numeric { buffer, .. } => {
                let value_display = if buffer.is_empty() {
                    Span::styled(field.hint, HeartTheme::text_muted())
                } else {
                    Span::styled(buffer.as_str(), HeartTheme::text())
                };
                Line::from(vec![
                    Span::raw(" "),
                    value_display,
                    if is_selected {
                        Span::styled("▌", HeartTheme::focused())
                    } else {
                        Span::raw("")
                    },
                    if buffer.is_empty() {
                        Span::raw("")
                    } else {
                        Span::styled(format!("  ({})", field.hint), HeartTheme::text_muted())
                    },
                ])
            }
            FieldInput::Choice { options, selected } => {
                let marker_style = if is_selected {
                    HeartTheme::focused()
                } else {
                    HeartTheme::text_muted()
                };
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled("◂ ", marker_style),
                    Span::styled(options[*selected], HeartTheme::text()),
                    Span::styled(" ▸", marker_style),
                ])
            }
        };

        f.render_widget(Paragraph::new(content).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", HeartTheme::danger()),
            Span::styled(err.clone(), HeartTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Tab] ", HeartTheme::key_hint()),
            Span::styled("Section ", HeartTheme::key_desc()),
            Span::styled("[↑↓] ", HeartTheme::key_hint()),
            Span::styled("Field ", HeartTheme::key_desc()),
            Span::styled("[◂▸] ", HeartTheme::key_hint()),
            Span::styled("Change ", HeartTheme::key_desc()),
            Span::styled("[Enter] ", HeartTheme::key_hint()),
            Span::styled("Analyze ", HeartTheme::key_desc()),
            Span::styled("[S] ", HeartTheme::key_hint()),
            Span::styled("Sample ", HeartTheme::key_desc()),
            Span::styled("[Esc] ", HeartTheme::key_hint()),
            Span::styled("Quit", HeartTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{lifestyle_advice, Advice};

    #[test]
    fn test_default_form_converts_to_profile() {
        let form = PatientFormState::default();
        let profile = form.to_profile().expect("default form is valid");

        assert_eq!(profile.age, 45);
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.region, Region::Urban);
        assert_eq!(profile.income_level, IncomeLevel::Middle);
        assert_eq!(profile.blood_pressure_systolic, 120);
        assert_eq!(profile.sleep_hours, 7);
        assert!(!profile.hypertension);
        assert!(!profile.diabetes);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_empty_numeric_field_is_missing_value() {
        let mut form = PatientFormState::default();
        form.sections[SEC_PROFILE].fields[0].set_buffer("");

        let err = form.to_profile().expect_err("must fail");
        assert_eq!(err, EncodingError::MissingValue { field: "age" });
    }

    #[test]
    fn test_out_of_range_numeric_field() {
        let mut form = PatientFormState::default();
        form.sections[SEC_CLINICAL].fields[0].set_buffer("500");

        let err = form.to_profile().expect_err("must fail");
        assert!(matches!(
            err,
            EncodingError::OutOfRange {
                field: "blood_pressure_systolic",
                ..
            }
        ));
    }

    #[test]
    fn test_choice_cycling_changes_profile() {
        let mut form = PatientFormState::default();
        form.section = SEC_LIFESTYLE;
        form.selected_field = 0; // smoking status
        form.cycle_right();
        form.cycle_right();

        let profile = form.to_profile().expect("valid form");
        assert_eq!(profile.smoking_status, SmokingStatus::Current);

        form.cycle_right(); // wraps back to Never
        let profile = form.to_profile().expect("valid form");
        assert_eq!(profile.smoking_status, SmokingStatus::Never);
    }

    #[test]
    fn test_sample_data_triggers_every_advice_rule() {
        let mut form = PatientFormState::default();
        form.load_sample_data();

        let profile = form.to_profile().expect("sample is valid");
        assert!(profile.validate().is_ok());
        assert_eq!(
            lifestyle_advice(&profile),
            vec![
                Advice::QuitSmoking,
                Advice::ImproveDiet,
                Advice::SleepMore,
                Advice::LimitPollution,
            ]
        );
    }

    #[test]
    fn test_digit_input_only_touches_numeric_fields() {
        let mut form = PatientFormState::default();
        form.section = SEC_PROFILE;
        form.selected_field = 0;
        form.clear_field();
        form.input_char('6');
        form.input_char('x'); // ignored
        form.input_char('3');

        let profile = form.to_profile().expect("valid form");
        assert_eq!(profile.age, 63);

        // Choice fields ignore character input entirely.
        form.selected_field = 1;
        form.input_char('9');
        let profile = form.to_profile().expect("valid form");
        assert_eq!(profile.gender, Gender::Male);
    }
}
