//! Patient profile types for heart-attack risk prediction.
//!
//! The profile mirrors the 25-column schema the classifier was trained on.
//! Every categorical field is a closed enum so an unrepresentable category
//! cannot reach the encoder; label parsing at the form boundary is the only
//! place a bad value can appear, and it fails with `EncodingError`.

use serde::{Deserialize, Serialize};

use super::encode::EncodingError;

/// Patient gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const LABELS: [&'static str; 2] = ["Male", "Female"];

    /// Parse a UI label.
    ///
    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match label {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            other => Err(EncodingError::unknown("gender", other)),
        }
    }
}

/// Residential region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Urban,
    Rural,
}

impl Region {
    /// Labels as presented by the original intake form.
    pub const LABELS: [&'static str; 2] = ["Urban (Kota)", "Rural (Desa)"];

    /// Parse a UI label. Any label containing "Urban" counts as urban,
    /// matching the trained encoding; everything else must be a known
    /// rural label.
    ///
    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        if label.contains("Urban") {
            Ok(Self::Urban)
        } else if label.contains("Rural") {
            Ok(Self::Rural)
        } else {
            Err(EncodingError::unknown("region", label))
        }
    }
}

/// Household income level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeLevel {
    Low,
    Middle,
    High,
}

impl IncomeLevel {
    pub const LABELS: [&'static str; 3] = ["Low", "Middle", "High"];

    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match label {
            "Low" => Ok(Self::Low),
            "Middle" => Ok(Self::Middle),
            "High" => Ok(Self::High),
            other => Err(EncodingError::unknown("income_level", other)),
        }
    }
}

/// Smoking history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokingStatus {
    Never,
    Past,
    Current,
}

impl SmokingStatus {
    pub const LABELS: [&'static str; 3] = ["Never", "Past", "Current"];

    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match label {
            "Never" => Ok(Self::Never),
            "Past" => Ok(Self::Past),
            "Current" => Ok(Self::Current),
            other => Err(EncodingError::unknown("smoking_status", other)),
        }
    }
}

/// Alcohol consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlcoholConsumption {
    None,
    Moderate,
    High,
}

impl AlcoholConsumption {
    pub const LABELS: [&'static str; 3] = ["None", "Moderate", "High"];

    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match label {
            "None" => Ok(Self::None),
            "Moderate" => Ok(Self::Moderate),
            "High" => Ok(Self::High),
            other => Err(EncodingError::unknown("alcohol_consumption", other)),
        }
    }
}

/// Physical activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhysicalActivity {
    Low,
    Moderate,
    High,
}

impl PhysicalActivity {
    pub const LABELS: [&'static str; 3] = ["Low", "Moderate", "High"];

    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match label {
            "Low" => Ok(Self::Low),
            "Moderate" => Ok(Self::Moderate),
            "High" => Ok(Self::High),
            other => Err(EncodingError::unknown("physical_activity", other)),
        }
    }
}

/// Dietary habits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietaryHabits {
    Healthy,
    Unhealthy,
}

impl DietaryHabits {
    pub const LABELS: [&'static str; 2] = ["Healthy", "Unhealthy"];

    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match label {
            "Healthy" => Ok(Self::Healthy),
            "Unhealthy" => Ok(Self::Unhealthy),
            other => Err(EncodingError::unknown("dietary_habits", other)),
        }
    }
}

/// Ambient air pollution exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirPollutionExposure {
    Low,
    Moderate,
    High,
}

impl AirPollutionExposure {
    pub const LABELS: [&'static str; 3] = ["Low", "Moderate", "High"];

    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match label {
            "Low" => Ok(Self::Low),
            "Moderate" => Ok(Self::Moderate),
            "High" => Ok(Self::High),
            other => Err(EncodingError::unknown("air_pollution_exposure", other)),
        }
    }
}

/// Self-reported stress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressLevel {
    Low,
    Moderate,
    High,
}

impl StressLevel {
    pub const LABELS: [&'static str; 3] = ["Low", "Moderate", "High"];

    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match label {
            "Low" => Ok(Self::Low),
            "Moderate" => Ok(Self::Moderate),
            "High" => Ok(Self::High),
            other => Err(EncodingError::unknown("stress_level", other)),
        }
    }
}

/// Resting electrocardiogram result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EkgResult {
    Normal,
    Abnormal,
}

impl EkgResult {
    pub const LABELS: [&'static str; 2] = ["Normal", "Abnormal"];

    /// # Errors
    /// Returns `EncodingError::UnknownCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match label {
            "Normal" => Ok(Self::Normal),
            "Abnormal" => Ok(Self::Abnormal),
            other => Err(EncodingError::unknown("EKG_results", other)),
        }
    }
}

/// One patient record, request-scoped: created fresh on each analysis and
/// discarded after rendering.
///
/// Field declaration order matches the trained model's column order; the
/// encoder constructs the feature vector from these fields explicitly rather
/// than relying on any reflective iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    pub region: Region,
    pub income_level: IncomeLevel,
    /// Diagnosed hypertension
    pub hypertension: bool,
    /// Diagnosed diabetes
    pub diabetes: bool,
    /// Total cholesterol in mg/dL
    pub cholesterol_level: u32,
    /// Waist circumference in cm
    pub waist_circumference: u32,
    /// Family history of heart disease
    pub family_history: bool,
    pub smoking_status: SmokingStatus,
    pub alcohol_consumption: AlcoholConsumption,
    pub physical_activity: PhysicalActivity,
    pub dietary_habits: DietaryHabits,
    pub air_pollution_exposure: AirPollutionExposure,
    pub stress_level: StressLevel,
    /// Hours of sleep per day
    pub sleep_hours: u32,
    /// Systolic blood pressure in mmHg
    pub blood_pressure_systolic: u32,
    /// Diastolic blood pressure in mmHg
    pub blood_pressure_diastolic: u32,
    /// Fasting blood sugar in mg/dL
    pub fasting_blood_sugar: u32,
    /// HDL cholesterol in mg/dL
    pub cholesterol_hdl: u32,
    /// LDL cholesterol in mg/dL
    pub cholesterol_ldl: u32,
    /// Triglycerides in mg/dL
    pub triglycerides: u32,
    pub ekg_results: EkgResult,
    /// Prior heart disease diagnosis
    pub previous_heart_disease: bool,
    /// Currently on heart medication
    pub medication_usage: bool,
}

impl PatientProfile {
    /// Validate that numeric measurements are within the intake form ranges.
    ///
    /// These bounds match the original data-collection widgets; they catch
    /// transcription mistakes before the value reaches the model.
    ///
    /// # Errors
    /// Returns all violations as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let checks: [(&str, u32, u32, u32); 10] = [
            ("age", self.age, 20, 90),
            ("sleep_hours", self.sleep_hours, 3, 12),
            ("blood_pressure_systolic", self.blood_pressure_systolic, 90, 220),
            ("blood_pressure_diastolic", self.blood_pressure_diastolic, 60, 140),
            ("cholesterol_level", self.cholesterol_level, 100, 400),
            ("cholesterol_ldl", self.cholesterol_ldl, 50, 250),
            ("cholesterol_hdl", self.cholesterol_hdl, 20, 100),
            ("fasting_blood_sugar", self.fasting_blood_sugar, 70, 300),
            ("triglycerides", self.triglycerides, 50, 400),
            ("waist_circumference", self.waist_circumference, 50, 150),
        ];

        for (name, value, min, max) in checks {
            if value < min || value > max {
                errors.push(format!("{name} {value} out of range [{min}, {max}]"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// The intake form's default inputs as a typed profile.
    pub(crate) fn baseline_profile() -> PatientProfile {
        PatientProfile {
            age: 45,
            gender: Gender::Male,
            region: Region::Urban,
            income_level: IncomeLevel::Middle,
            hypertension: false,
            diabetes: false,
            cholesterol_level: 200,
            waist_circumference: 80,
            family_history: false,
            smoking_status: SmokingStatus::Never,
            alcohol_consumption: AlcoholConsumption::None,
            physical_activity: PhysicalActivity::Moderate,
            dietary_habits: DietaryHabits::Healthy,
            air_pollution_exposure: AirPollutionExposure::Low,
            stress_level: StressLevel::Low,
            sleep_hours: 7,
            blood_pressure_systolic: 120,
            blood_pressure_diastolic: 80,
            fasting_blood_sugar: 100,
            cholesterol_hdl: 50,
            cholesterol_ldl: 100,
            triglycerides: 150,
            ekg_results: EkgResult::Normal,
            previous_heart_disease: false,
            medication_usage: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::baseline_profile;
    use super::*;

    #[test]
    fn test_label_parsing_round_trip() {
        assert_eq!(Gender::from_label("Female").unwrap(), Gender::Female);
        assert_eq!(Region::from_label("Urban (Kota)").unwrap(), Region::Urban);
        assert_eq!(Region::from_label("Rural (Desa)").unwrap(), Region::Rural);
        assert_eq!(
            SmokingStatus::from_label("Current").unwrap(),
            SmokingStatus::Current
        );
        assert_eq!(
            IncomeLevel::from_label("High").unwrap(),
            IncomeLevel::High
        );
        assert_eq!(
            EkgResult::from_label("Abnormal").unwrap(),
            EkgResult::Abnormal
        );
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = SmokingStatus::from_label("Sometimes").unwrap_err();
        assert_eq!(
            err,
            EncodingError::UnknownCategory {
                field: "smoking_status",
                value: "Sometimes".to_string(),
            }
        );

        assert!(Gender::from_label("").is_err());
        assert!(Region::from_label("Suburban").is_err());
        assert!(AlcoholConsumption::from_label("none").is_err());
    }

    #[test]
    fn test_validation() {
        assert!(baseline_profile().validate().is_ok());

        let mut invalid = baseline_profile();
        invalid.age = 10;
        invalid.sleep_hours = 20;
        let errors = invalid.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("age"));
    }
}
