//! Advisor briefings - read-only analysis of a country's situation

use serde::{Deserialize, Serialize};

use crate::world::country::{Country, Expertise};

/// What one advisor tells the head of government
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Briefing {
    /// Advisor name, or a generic title when the cabinet has no such expert
    pub advisor: String,
    pub expertise: Expertise,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

fn title_for(expertise: Expertise) -> &'static str {
    match expertise {
        Expertise::Military => "Military Advisor",
        Expertise::Economy => "Economic Advisor",
        Expertise::ForeignPolicy => "Diplomatic Advisor",
        Expertise::Intelligence => "Intelligence Advisor",
        Expertise::Domestic => "Domestic Advisor",
    }
}

fn analyze(country: &Country, expertise: Expertise, aggressive: bool) -> &'static str {
    match expertise {
        Expertise::Military => {
            if country.military.readiness < 30.0 {
                "We need to increase military readiness immediately."
            } else if country.military.strength < 40.0 {
                "Our military strength is concerning. Consider defense spending."
            } else if aggressive {
                "A show of force would be appropriate here."
            } else {
                "Our military position is stable."
            }
        }
        Expertise::Economy => {
            if country.economy.stability < 30.0 {
                "Economic crisis imminent! Emergency measures needed."
            } else if country.economy.debt > country.economy.gdp {
                "Debt levels are unsustainable."
            } else if country.economy.gdp < 500.0 {
                "GDP is critically low. Focus on economic growth."
            } else {
                "Economy is performing within acceptable parameters."
            }
        }
        Expertise::ForeignPolicy => {
            if country.alliance.is_none() {
                "We should consider joining an alliance for security."
            } else if country.escalation_risk > 70.0 {
                "Tensions are high. Diplomatic channels should be opened."
            } else {
                "Our diplomatic standing is stable."
            }
        }
        Expertise::Intelligence => {
            if country.opinion.unrest > 50.0 {
                "Intelligence suggests growing domestic unrest."
            } else if country.escalation_risk > 60.0 {
                "Foreign threats detected. Recommend heightened alert."
            } else {
                "No significant threats detected at this time."
            }
        }
        Expertise::Domestic => {
            if country.opinion.approval < 30.0 {
                "Public approval is critically low. Action needed."
            } else if country.opinion.unrest > 60.0 {
                "Civil unrest is reaching dangerous levels."
            } else {
                "Domestic situation is manageable."
            }
        }
    }
}

fn recommend(country: &Country, expertise: Expertise) -> Vec<String> {
    let mut out = Vec::new();
    let mut push_if = |condition: bool, text: &str| {
        if condition {
            out.push(text.to_string());
        }
    };

    match expertise {
        Expertise::Military => {
            push_if(country.military.readiness < 50.0, "Increase military readiness");
            push_if(country.military.strength < 50.0, "Boost defense spending");
        }
        Expertise::Economy => {
            push_if(country.economy.stability < 50.0, "Stabilize the economy");
            push_if(country.economy.debt > country.economy.gdp * 0.8, "Reduce national debt");
        }
        Expertise::ForeignPolicy => {
            push_if(country.escalation_risk > 50.0, "Open diplomatic channels");
            push_if(country.alliance.is_none(), "Seek alliance membership");
        }
        Expertise::Intelligence => push_if(true, "Continue monitoring threats"),
        Expertise::Domestic => {
            push_if(country.opinion.approval < 50.0, "Improve public approval");
            push_if(country.opinion.unrest > 40.0, "Address civil unrest");
        }
    }
    out
}

/// Briefing from the country's advisor for `expertise`
pub fn briefing(country: &Country, expertise: Expertise) -> Briefing {
    let advisor = country
        .government
        .advisors
        .iter()
        .find(|a| a.expertise == expertise);

    Briefing {
        advisor: advisor
            .map(|a| a.name.clone())
            .unwrap_or_else(|| title_for(expertise).to_string()),
        expertise,
        analysis: analyze(country, expertise, advisor.is_some_and(|a| a.aggressive)).to_string(),
        recommendations: recommend(country, expertise),
    }
}
