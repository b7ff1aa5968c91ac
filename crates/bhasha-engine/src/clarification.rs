//! Localized clarification prompts.
//!
//! When alternatives exist the prompt names the detected dialect and the
//! strongest alternative; otherwise it asks the speaker to repeat. Dialects
//! are named in their own script except in English prompts.

use bhasha_core::models::{Dialect, DialectConfidence, Language};

struct Phrases {
    /// `{options}` is replaced by the candidate dialect names.
    confirm: &'static str,
    or: &'static str,
    repeat: &'static str,
}

fn phrases(language: Language) -> Phrases {
    match language {
        Language::Hindi => Phrases {
            confirm: "क्या आप {options} बोल रहे हैं? कृपया पुष्टि करें।",
            or: " या ",
            repeat: "क्षमा करें, मैं ठीक से समझ नहीं पाया। कृपया दोबारा कहें।",
        },
        Language::Bengali => Phrases {
            confirm: "আপনি কি {options} বলছেন? অনুগ্রহ করে নিশ্চিত করুন।",
            or: " অথবা ",
            repeat: "দুঃখিত, আমি ঠিক বুঝতে পারিনি। অনুগ্রহ করে আবার বলুন।",
        },
        Language::Telugu => Phrases {
            confirm: "మీరు {options} మాట్లాడుతున్నారా? దయచేసి నిర్ధారించండి.",
            or: " లేదా ",
            repeat: "క్షమించండి, నాకు సరిగ్గా అర్థం కాలేదు. దయచేసి మళ్ళీ చెప్పండి.",
        },
        Language::Tamil => Phrases {
            confirm: "நீங்கள் {options} பேசுகிறீர்களா? தயவுசெய்து உறுதிப்படுத்தவும்.",
            or: " அல்லது ",
            repeat: "மன்னிக்கவும், எனக்கு சரியாகப் புரியவில்லை. தயவுசெய்து மீண்டும் சொல்லுங்கள்.",
        },
        Language::Marathi => Phrases {
            confirm: "तुम्ही {options} बोलत आहात का? कृपया खात्री करा.",
            or: " किंवा ",
            repeat: "माफ करा, मला नीट समजले नाही. कृपया पुन्हा सांगा.",
        },
        Language::Gujarati => Phrases {
            confirm: "શું તમે {options} બોલો છો? કૃપા કરીને પુષ્ટિ કરો.",
            or: " અથવા ",
            repeat: "માફ કરશો, મને બરાબર સમજાયું નહીં. કૃપા કરીને ફરીથી કહો.",
        },
        Language::Kannada => Phrases {
            confirm: "ನೀವು {options} ಮಾತನಾಡುತ್ತಿದ್ದೀರಾ? ದಯವಿಟ್ಟು ಖಚಿತಪಡಿಸಿ.",
            or: " ಅಥವಾ ",
            repeat: "ಕ್ಷಮಿಸಿ, ನನಗೆ ಸರಿಯಾಗಿ ಅರ್ಥವಾಗಲಿಲ್ಲ. ದಯವಿಟ್ಟು ಮತ್ತೆ ಹೇಳಿ.",
        },
        Language::Malayalam => Phrases {
            confirm: "നിങ്ങൾ {options} ആണോ സംസാരിക്കുന്നത്? ദയവായി സ്ഥിരീകരിക്കുക.",
            or: " അല്ലെങ്കിൽ ",
            repeat: "ക്ഷമിക്കണം, എനിക്ക് ശരിയായി മനസ്സിലായില്ല. ദയവായി വീണ്ടും പറയാമോ?",
        },
        Language::Punjabi => Phrases {
            confirm: "ਕੀ ਤੁਸੀਂ {options} ਬੋਲ ਰਹੇ ਹੋ? ਕਿਰਪਾ ਕਰਕੇ ਪੁਸ਼ਟੀ ਕਰੋ।",
            or: " ਜਾਂ ",
            repeat: "ਮਾਫ਼ ਕਰਨਾ, ਮੈਨੂੰ ਠੀਕ ਤਰ੍ਹਾਂ ਸਮਝ ਨਹੀਂ ਆਇਆ। ਕਿਰਪਾ ਕਰਕੇ ਦੁਬਾਰਾ ਕਹੋ।",
        },
        Language::Odia => Phrases {
            confirm: "ଆପଣ କଣ {options} କହୁଛନ୍ତି? ଦୟାକରି ନିଶ୍ଚିତ କରନ୍ତୁ।",
            or: " କିମ୍ବା ",
            repeat: "କ୍ଷମା କରନ୍ତୁ, ମୁଁ ଠିକ୍ ଭାବେ ବୁଝିପାରିଲି ନାହିଁ। ଦୟାକରି ପୁଣି କୁହନ୍ତୁ।",
        },
        Language::English => Phrases {
            confirm: "Did you mean {options}? Please confirm your dialect.",
            or: " or ",
            repeat: "Sorry, I could not understand clearly. Could you please repeat that?",
        },
    }
}

/// Build the prompt in `language` for a low-confidence detection.
pub fn prompt(language: Language, primary: Dialect, alternatives: &[DialectConfidence]) -> String {
    let phrases = phrases(language);
    match alternatives.iter().find(|alt| alt.dialect != primary) {
        Some(alt) => {
            let options = format!(
                "{}{}{}",
                display_name(language, primary),
                phrases.or,
                display_name(language, alt.dialect)
            );
            phrases.confirm.replace("{options}", &options)
        }
        None => phrases.repeat.to_string(),
    }
}

fn display_name(language: Language, dialect: Dialect) -> &'static str {
    match language {
        Language::English => dialect.name(),
        _ => dialect.native_name(),
    }
}
