/// Issue description builder.
/// Descriptions are clinician-facing: they name the signal and the
/// practical consequence, nothing more.
pub struct MessageTemplates;

impl MessageTemplates {
    pub fn bmi_obese(bmi: f64) -> String {
        format!(
            "BMI {bmi:.1} indicates obesity; consider dose adjustments and \
             monitor cardiovascular risk."
        )
    }

    pub fn bmi_elevated(bmi: f64) -> String {
        format!(
            "BMI {bmi:.1} is elevated; pair therapy with lifestyle optimization."
        )
    }

    pub fn bp_uncontrolled(bp: &str) -> String {
        format!(
            "Blood pressure {bp} suggests uncontrolled hypertension. \
             Bring BP under control before starting risk-increasing medications."
        )
    }

    pub fn bp_elevated(bp: &str) -> String {
        format!(
            "Blood pressure {bp} is elevated; monitor closely when adjusting \
             vasoactive medications."
        )
    }

    pub fn cardiac_history() -> String {
        "History of heart disease; obtain cardiac clearance before vasoactive \
         or androgen-modifying therapy."
            .to_string()
    }

    pub fn renal_impairment() -> String {
        "Kidney disease; prefer conservative dosing and avoid nephrotoxic combinations."
            .to_string()
    }

    pub fn hepatic_impairment() -> String {
        "Liver disease; use lower starting doses and monitor liver function where applicable."
            .to_string()
    }

    pub fn metabolic_risk() -> String {
        "Diabetes raises cardiovascular risk; reinforce glycemic and lifestyle control."
            .to_string()
    }

    pub fn age_related() -> String {
        "Age over 65; start low and titrate slowly with vasoactive agents, \
         watch for orthostatic changes."
            .to_string()
    }

    pub fn smoking() -> String {
        "Current smoker; encourage cessation, adds cardiovascular risk.".to_string()
    }

    pub fn heavy_alcohol() -> String {
        "Heavy alcohol use; counsel moderation, may worsen BP and medication tolerance."
            .to_string()
    }

    pub fn nitrate_contraindication() -> String {
        "Nitrate therapy present; PDE5 inhibitors are contraindicated. Avoid \
         tadalafil, sildenafil and vardenafil and coordinate with cardiology."
            .to_string()
    }

    pub fn pde5_amlodipine() -> String {
        "PDE5 inhibitor may enhance the hypotensive effect of amlodipine. \
         Monitor BP closely during initiation."
            .to_string()
    }

    pub fn pde5_tamsulosin() -> String {
        "PDE5 inhibitor with tamsulosin: additive alpha-blockade can cause dizziness \
         or fainting on standing. Separate dosing and start at the lowest dose."
            .to_string()
    }

    pub fn pde5_cardiac_clearance() -> String {
        "Cardiac history; confirm the patient is cleared for sexual activity \
         before PDE5 use."
            .to_string()
    }

    pub fn pde5_heavy_alcohol() -> String {
        "Heavy alcohol use with a PDE5 inhibitor increases the chance of \
         lightheadedness; advise limiting intake around doses."
            .to_string()
    }

    /// Allergy matched against the selected plan.
    pub fn plan_allergy(allergy: &str, medication: &str) -> String {
        format!(
            "Reported allergy \"{allergy}\" matches the recommended medication {medication}. \
             Do not prescribe until the allergy is clarified."
        )
    }

    /// Allergy matched against an alternative option.
    pub fn alternative_allergy(allergy: &str, medication: &str) -> String {
        format!(
            "Reported allergy \"{allergy}\" matches alternative option {medication}; \
             exclude it unless the allergy is ruled out."
        )
    }

    pub fn dose_cap(medication: &str, dose_mg: f64, cap_mg: f64) -> String {
        format!(
            "{medication} dose of {dose_mg}mg exceeds the {cap_mg}mg ceiling for \
             PDE5 inhibitors; reduce the dose."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_message_rounds_to_one_decimal() {
        let msg = MessageTemplates::bmi_obese(35.918);
        assert!(msg.contains("35.9"));
    }

    #[test]
    fn amlodipine_message_mentions_hypotension() {
        assert!(MessageTemplates::pde5_amlodipine().contains("hypotensive"));
    }

    #[test]
    fn tamsulosin_message_is_distinct_from_amlodipine() {
        assert!(!MessageTemplates::pde5_tamsulosin().contains("hypotens"));
    }

    #[test]
    fn allergy_messages_name_both_parties() {
        let msg = MessageTemplates::plan_allergy("tadalafil", "Tadalafil");
        assert!(msg.contains("\"tadalafil\""));
        assert!(msg.contains("Tadalafil."));
    }
}
