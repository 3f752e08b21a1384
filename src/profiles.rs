//! Per-language prompt bundles for the coach persona

use log::trace;

/// Prompt texts for one language
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageProfile
{   /// Language code this profile belongs to
    pub code: &'static str
  , /// Persona and constraints, always the first message
    pub system_prompt: &'static str
  , /// Instruction sent as the only user turn in greeting mode
    pub greeting_prompt: &'static str
  , /// Prefix of the summary context entry
    pub summary_label: &'static str
}

pub static DE: LanguageProfile = LanguageProfile
{   code: "de"
  , system_prompt: concat!(
      "Du bist Gugi – ein freundlicher, pragmatischer Gesundheitscoach ",
      "für die App 'Scarletts Gesundheitstracking'. ",
      "Nutze ausschließlich die bereitgestellte Zusammenfassung (summary), ",
      "keine Websuche. ",
      "Gib konkrete, kurze Tipps (1–3 Sätze), keine Diagnosen, ",
      "kein medizinischer Rat. ",
      "Sprich locker, positiv, aber präzise. ",
      "Beziehe dich auf die Gesundheitsdaten der Nutzerin."
    )
  , greeting_prompt: concat!(
      "Gib einen kurzen, persönlichen Gesundheitstipp ",
      "basierend auf den aktuellen Daten."
    )
  , summary_label: "Aktuelle Gesundheitsdaten"
};

pub static EN: LanguageProfile = LanguageProfile
{   code: "en"
  , system_prompt: concat!(
      "You are Gugi – a friendly, pragmatic health coach ",
      "for the 'Scarletts Gesundheitstracking' app. ",
      "Use only the provided summary; no web browsing. ",
      "Provide concrete, short tips (1–3 sentences), ",
      "no diagnoses or medical advice. ",
      "Be casual, positive, and precise. ",
      "Reference the user's health data."
    )
  , greeting_prompt: "Give a short, personal health tip based on current data."
  , summary_label: "Current health data"
};

pub static PL: LanguageProfile = LanguageProfile
{   code: "pl"
  , system_prompt: concat!(
      "Jesteś Gugi – przyjaznym, pragmatycznym trenerem zdrowia ",
      "dla aplikacji 'Scarletts Gesundheitstracking'. ",
      "Używaj wyłącznie podanego podsumowania; bez przeglądania sieci. ",
      "Dawaj konkretne, krótkie wskazówki (1–3 zdania), ",
      "bez diagnoz i porad medycznych. ",
      "Mów swobodnie, pozytywnie i precyzyjnie. ",
      "Odnoś się do danych zdrowotnych użytkowniczki."
    )
  , greeting_prompt: concat!(
      "Podaj krótką, osobistą wskazówkę zdrowotną ",
      "na podstawie aktualnych danych."
    )
  , summary_label: "Aktualne dane zdrowotne"
};

/// Look up the profile for a language code.
///
/// Total: unknown or empty codes get the German profile.
pub fn resolve(code: &str) -> &'static LanguageProfile
{   match code
    {   "en" => &EN
      , "pl" => &PL
      , "de" => &DE
      , other => {
          trace!("Unknown language '{}', using de profile", other);
          &DE
        }
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn supported_codes_resolve_to_their_profile()
    {   assert_eq!(resolve("de").code, "de");
        assert_eq!(resolve("en").code, "en");
        assert_eq!(resolve("pl").code, "pl");
    }

    #[test]
    fn unknown_codes_fall_back_to_german()
    {   for code in ["", "fr", "EN", "de-AT", " en"]
        {   assert_eq!(resolve(code), &DE, "code {:?}", code);
        }
    }

    #[test]
    fn typed_language_matches_registry()
    {   assert_eq!(crate::Language::En.profile(), &EN);
        assert_eq!(crate::Language::default().profile(), &DE);
    }

    #[test]
    fn every_profile_forbids_diagnoses()
    {   assert!(DE.system_prompt.contains("keine Diagnosen"));
        assert!(EN.system_prompt.contains("no diagnoses"));
        assert!(PL.system_prompt.contains("bez diagnoz"));
    }
}
