use crate::language::Language;

pub const INSTRUCTIONS_EN: &str = "Summarize the text in one concise, natural sentence, in first person only. Do not mention the text, author, or writer. Never include phrases like \u{201C}This text,\u{201D} \u{201C}This user,\u{201D} or \u{201C}The following describes.\u{201D} Do not explain, apologize, or mention context. If the text is short or unclear, infer a plausible short summary.";

pub const INSTRUCTIONS_IT: &str = "Riassumi il testo in un'unica frase concisa e naturale, solo in prima persona. Non menzionare il testo, l'autore o lo scrittore. Non includere frasi come \u{201C}Questo testo\u{201D}, \u{201C}Questo utente\u{201D} o \u{201C}Quanto segue descrive\u{201D}. Non spiegare, non scusarti e non menzionare il contesto. Se il testo \u{00E8} breve o poco chiaro, deduci un breve riassunto plausibile.";

/// Italian gets its own template; everything else, unknown included, reads
/// the English one.
pub fn instructions_for(language: Option<Language>) -> &'static str {
    match language {
        Some(Language::Italian) => INSTRUCTIONS_IT,
        Some(Language::English) | None => INSTRUCTIONS_EN,
    }
}
