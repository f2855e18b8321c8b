//! Localized UI strings.
//!
//! English is complete; every other table may omit keys and falls back to the
//! English string.

mod sample_text;

pub use sample_text::sample_text;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Sv,
}

impl Language {
    pub const ALL: [Language; 5] = [Self::En, Self::Es, Self::Fr, Self::De, Self::Sv];

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Sv => "sv",
        }
    }

    /// Parses a language code such as `es` or `de-AT`. Region suffixes and
    /// case are ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or("");
        Self::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(primary))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    Title,
    Subtitle,
    StartReading,
    Pause,
    Resume,
    StartOver,
    Reset,
    Wpm,
    Word,
    Of,
    ReadyStart,
    Finished,
    EnterText,
    EnterSearch,
    Searching,
    NoBooks,
    SearchError,
    LoadError,
    NoTextVersion,
    TextTooShort,
    FetchFailed,
    LoadedSuccess,
    ManualDownload,
    DownloadInstructions,
    DownloadLink,
    NetworkError,
    InputError,
    CheckInput,
}

pub fn translate(language: Language, key: Key) -> &'static str {
    let localized = match language {
        Language::En => None,
        Language::Es => es(key),
        Language::Fr => fr(key),
        Language::De => de(key),
        Language::Sv => sv(key),
    };
    localized.unwrap_or_else(|| en(key))
}

fn en(key: Key) -> &'static str {
    match key {
        Key::Title => "Speed Reader",
        Key::Subtitle => "Read faster by focusing on one word at a time",
        Key::StartReading => "Start Reading",
        Key::Pause => "Pause",
        Key::Resume => "Resume",
        Key::StartOver => "Start Over",
        Key::Reset => "Reset",
        Key::Wpm => "WPM",
        Key::Word => "Word",
        Key::Of => "of",
        Key::ReadyStart => "Ready to start",
        Key::Finished => "✅ Finished!",
        Key::EnterText => "Enter some text to begin",
        Key::EnterSearch => "Please enter a search term",
        Key::Searching => "Searching books...",
        Key::NoBooks => "No books found. Try a different search term.",
        Key::SearchError => "Error searching books. Please try again.",
        Key::LoadError => "Could not load this book",
        Key::NoTextVersion => "No text version available for this book",
        Key::TextTooShort => "Text content is too short or corrupted",
        Key::FetchFailed => "Failed to fetch book text",
        Key::LoadedSuccess => "Loaded!",
        Key::ManualDownload => "Manual Download Required",
        Key::DownloadInstructions => "Automatic loading failed.",
        Key::DownloadLink => "Download Text File",
        Key::NetworkError => "Network error - try again or use the manual download option",
        Key::InputError => "INPUT ERROR",
        Key::CheckInput => "CHECK PROVIDER",
    }
}

fn es(key: Key) -> Option<&'static str> {
    Some(match key {
        Key::Title => "Lector Rápido",
        Key::Subtitle => "Lee más rápido enfocándote en una palabra a la vez",
        Key::StartReading => "Comenzar Lectura",
        Key::Pause => "Pausar",
        Key::Resume => "Reanudar",
        Key::StartOver => "Empezar de Nuevo",
        Key::Reset => "Reiniciar",
        Key::Wpm => "PPM",
        Key::Word => "Palabra",
        Key::Of => "de",
        Key::ReadyStart => "Listo para comenzar",
        Key::Finished => "✅ ¡Terminado!",
        Key::EnterText => "Ingresa algún texto para comenzar",
        Key::EnterSearch => "Por favor ingresa un término de búsqueda",
        Key::Searching => "Buscando libros...",
        Key::NoBooks => "No se encontraron libros. Prueba con un término diferente.",
        Key::SearchError => "Error al buscar libros. Por favor intenta de nuevo.",
        Key::LoadError => "No se pudo cargar este libro",
        Key::NoTextVersion => "No hay versión de texto disponible para este libro",
        Key::TextTooShort => "El contenido del texto es demasiado corto o está corrupto",
        Key::FetchFailed => "Error al obtener el texto del libro",
        Key::LoadedSuccess => "¡Cargado!",
        Key::ManualDownload => "Descarga Manual Requerida",
        Key::DownloadInstructions => "La carga automática falló.",
        Key::DownloadLink => "Descargar Archivo de Texto",
        Key::NetworkError => "Error de red - intenta de nuevo o usa la opción de descarga manual",
        Key::InputError => "ERROR DE ENTRADA",
        Key::CheckInput => "REVISA LA FUENTE",
    })
}

fn fr(key: Key) -> Option<&'static str> {
    Some(match key {
        Key::Title => "Lecteur Rapide",
        Key::Subtitle => "Lisez plus vite en vous concentrant sur un mot à la fois",
        Key::StartReading => "Commencer la Lecture",
        Key::Pause => "Pause",
        Key::Resume => "Reprendre",
        Key::StartOver => "Recommencer",
        Key::Reset => "Réinitialiser",
        Key::Wpm => "MPM",
        Key::Word => "Mot",
        Key::Of => "de",
        Key::ReadyStart => "Prêt à commencer",
        Key::Finished => "✅ Terminé !",
        Key::EnterText => "Entrez du texte pour commencer",
        Key::EnterSearch => "Veuillez entrer un terme de recherche",
        Key::Searching => "Recherche de livres...",
        Key::NoBooks => "Aucun livre trouvé. Essayez un terme différent.",
        Key::SearchError => "Erreur lors de la recherche de livres. Veuillez réessayer.",
        Key::LoadError => "Impossible de charger ce livre",
        Key::NoTextVersion => "Aucune version texte disponible pour ce livre",
        Key::TextTooShort => "Le contenu du texte est trop court ou corrompu",
        Key::FetchFailed => "Échec de la récupération du texte du livre",
        Key::LoadedSuccess => "Chargé !",
        Key::ManualDownload => "Téléchargement Manuel Requis",
        Key::DownloadInstructions => "Le chargement automatique a échoué.",
        Key::DownloadLink => "Télécharger le Fichier Texte",
        Key::NetworkError => {
            "Erreur réseau - réessayez ou utilisez l'option de téléchargement manuel"
        }
        Key::InputError => "ERREUR DE SAISIE",
        Key::CheckInput => "VÉRIFIEZ LA SOURCE",
    })
}

fn de(key: Key) -> Option<&'static str> {
    Some(match key {
        Key::Title => "Schnellleser",
        Key::Subtitle => {
            "Lesen Sie schneller, indem Sie sich auf ein Wort nach dem anderen konzentrieren"
        }
        Key::StartReading => "Lesen Beginnen",
        Key::Pause => "Pausieren",
        Key::Resume => "Fortsetzen",
        Key::StartOver => "Von Vorne Beginnen",
        Key::Reset => "Zurücksetzen",
        Key::Wpm => "WpM",
        Key::Word => "Wort",
        Key::Of => "von",
        Key::ReadyStart => "Bereit zum Starten",
        Key::Finished => "✅ Fertig!",
        Key::EnterText => "Geben Sie Text ein, um zu beginnen",
        Key::EnterSearch => "Bitte geben Sie einen Suchbegriff ein",
        Key::Searching => "Bücher werden gesucht...",
        Key::NoBooks => "Keine Bücher gefunden. Versuchen Sie einen anderen Suchbegriff.",
        Key::SearchError => "Fehler beim Suchen von Büchern. Bitte versuchen Sie es erneut.",
        Key::LoadError => "Dieses Buch konnte nicht geladen werden",
        Key::NoTextVersion => "Keine Textversion für dieses Buch verfügbar",
        Key::TextTooShort => "Textinhalt ist zu kurz oder beschädigt",
        Key::FetchFailed => "Fehler beim Abrufen des Buchtexts",
        Key::LoadedSuccess => "Geladen!",
        Key::ManualDownload => "Manueller Download Erforderlich",
        Key::DownloadInstructions => "Das automatische Laden ist fehlgeschlagen.",
        Key::DownloadLink => "Textdatei Herunterladen",
        Key::NetworkError => {
            "Netzwerkfehler - versuchen Sie es erneut oder nutzen Sie die manuelle Download-Option"
        }
        Key::InputError => "EINGABEFEHLER",
        Key::CheckInput => "QUELLE PRÜFEN",
    })
}

fn sv(key: Key) -> Option<&'static str> {
    match key {
        Key::Title => Some("Snabbläsare"),
        Key::Subtitle => Some("Läs snabbare genom att fokusera på ett ord i taget"),
        Key::StartReading => Some("Börja Läsa"),
        Key::Pause => Some("Pausa"),
        Key::Resume => Some("Fortsätt"),
        Key::StartOver => Some("Börja Om"),
        Key::Reset => Some("Återställ"),
        Key::Wpm => Some("OPM"),
        Key::Word => Some("Ord"),
        Key::Of => Some("av"),
        Key::ReadyStart => Some("Redo att börja"),
        Key::Finished => Some("✅ Klar!"),
        Key::EnterText => Some("Ange text för att börja"),
        Key::EnterSearch => Some("Vänligen ange en sökterm"),
        Key::Searching => Some("Söker böcker..."),
        Key::NoBooks => Some("Inga böcker hittades. Prova en annan sökterm."),
        Key::SearchError => Some("Fel vid sökning av böcker. Försök igen."),
        Key::LoadError => Some("Kunde inte ladda denna bok"),
        Key::NoTextVersion => Some("Ingen textversion tillgänglig för denna bok"),
        Key::TextTooShort => Some("Textinnehållet är för kort eller skadat"),
        Key::FetchFailed => Some("Misslyckades med att hämta boktext"),
        Key::LoadedSuccess => Some("Laddat!"),
        Key::InputError => Some("INMATNINGSFEL"),
        Key::CheckInput => Some("KONTROLLERA KÄLLAN"),
        Key::ManualDownload
        | Key::DownloadInstructions
        | Key::DownloadLink
        | Key::NetworkError => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_with_regions_and_case() {
        assert_eq!(Language::from_code("es"), Some(Language::Es));
        assert_eq!(Language::from_code("DE-at"), Some(Language::De));
        assert_eq!(Language::from_code("sv_SE"), Some(Language::Sv));
        assert_eq!(Language::from_code("pt"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn codes_round_trip() {
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
    }

    #[test]
    fn missing_swedish_strings_fall_back_to_english() {
        assert_eq!(
            translate(Language::Sv, Key::ManualDownload),
            translate(Language::En, Key::ManualDownload)
        );
        assert_eq!(translate(Language::Sv, Key::Pause), "Pausa");
    }

    #[test]
    fn localized_labels_differ_from_english() {
        assert_eq!(translate(Language::Es, Key::ReadyStart), "Listo para comenzar");
        assert_eq!(translate(Language::Fr, Key::Wpm), "MPM");
        assert_eq!(translate(Language::De, Key::Of), "von");
    }
}
