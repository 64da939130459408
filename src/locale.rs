//! Page language and the user-facing strings for each

use crate::error::CalcError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language of the rendered pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            other => Err(format!("unknown locale '{}' (expected en or fr)", other)),
        }
    }
}

/// Fixed labels used by the page templates
pub struct Labels {
    pub lang: &'static str,
    pub index_title: &'static str,
    pub result_title: &'static str,
    pub heading: &'static str,
    pub subheading: &'static str,
    pub first_operand: &'static str,
    pub second_operand: &'static str,
    pub operation: &'static str,
    pub op_add: &'static str,
    pub op_sub: &'static str,
    pub op_mul: &'static str,
    pub op_div: &'static str,
    pub submit: &'static str,
    pub error: &'static str,
    pub calculation: &'static str,
    pub submitted: &'static str,
    pub previous_access: &'static str,
    pub current_access: &'static str,
    pub first_visit: &'static str,
    pub new_calculation: &'static str,
    pub back: &'static str,
}

const EN: Labels = Labels {
    lang: "en",
    index_title: "Calculator",
    result_title: "Result — Calculator",
    heading: "Calculator",
    subheading: "Server-side session — last access",
    first_operand: "First number",
    second_operand: "Second number",
    operation: "Operation",
    op_add: "Add (+)",
    op_sub: "Subtract (−)",
    op_mul: "Multiply (×)",
    op_div: "Divide (÷)",
    submit: "Calculate",
    error: "Error",
    calculation: "Calculation",
    submitted: "Submitted",
    previous_access: "Last access (previous)",
    current_access: "Current access (stored in session)",
    first_visit: "(None — first visit)",
    new_calculation: "New calculation",
    back: "Back",
};

const FR: Labels = Labels {
    lang: "fr",
    index_title: "Calculatrice",
    result_title: "Résultat — Calculatrice",
    heading: "Calculatrice",
    subheading: "Session côté serveur — dernier accès",
    first_operand: "Premier nombre",
    second_operand: "Deuxième nombre",
    operation: "Opération",
    op_add: "Addition (+)",
    op_sub: "Soustraction (−)",
    op_mul: "Multiplication (×)",
    op_div: "Division (÷)",
    submit: "Calculer",
    error: "Erreur",
    calculation: "Calcul",
    submitted: "Saisie",
    previous_access: "Dernier accès (précédent)",
    current_access: "Accès actuel (stocké en session)",
    first_visit: "(Aucun — première visite)",
    new_calculation: "Nouveau calcul",
    back: "Retour",
};

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Fr => &FR,
        }
    }

    /// Message shown for a calculation error
    pub fn error_message(self, err: &CalcError) -> String {
        match self {
            Locale::En => err.to_string(),
            Locale::Fr => match err {
                CalcError::MissingParameter => "Paramètres manquants.".to_string(),
                CalcError::InvalidNumber => {
                    "Entrée invalide : veuillez entrer des nombres valides (ex: 12.5).".to_string()
                }
                CalcError::DivisionByZero => "Division par zéro.".to_string(),
                CalcError::InvalidOperation => "Opération invalide.".to_string(),
                CalcError::Unexpected(detail) => format!("Erreur : {}", detail),
            },
        }
    }
}
