//! Localized user-facing messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

/// Fixed messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    ErrorLoadingBackups,
    ErrorLoadingFiles,
    ErrorDownload,
    ErrorSelection,
    NoBackups,
    NoBackupSelected,
    DownloadAction,
    Loading,
    EmptyDirectory,
    Saved,
}

impl Locale {
    pub fn text(self, message: Message) -> &'static str {
        use Message::*;
        match self {
            Locale::En => match message {
                ErrorLoadingBackups => "Error loading backups",
                ErrorLoadingFiles => "Error loading files",
                ErrorDownload => "Download failed",
                ErrorSelection => "Please select at least one item",
                NoBackups => "No backups available",
                NoBackupSelected => "No backup selected",
                DownloadAction => "Download",
                Loading => "Loading...",
                EmptyDirectory => "Empty directory",
                Saved => "Saved",
            },
            Locale::Fr => match message {
                ErrorLoadingBackups => "Erreur lors du chargement des sauvegardes",
                ErrorLoadingFiles => "Erreur lors du chargement des fichiers",
                ErrorDownload => "Échec du téléchargement",
                ErrorSelection => "Veuillez sélectionner au moins un élément",
                NoBackups => "Aucune sauvegarde disponible",
                NoBackupSelected => "Aucune sauvegarde sélectionnée",
                DownloadAction => "Télécharger",
                Loading => "Chargement...",
                EmptyDirectory => "Dossier vide",
                Saved => "Enregistré",
            },
        }
    }

    pub fn minutes_ago(self, minutes: i64) -> String {
        match self {
            Locale::En => format!("{} minutes ago", minutes),
            Locale::Fr => format!("il y a {} minutes", minutes),
        }
    }

    pub fn hours_ago(self, hours: i64) -> String {
        match self {
            Locale::En => format!("{} hours ago", hours),
            Locale::Fr => format!("il y a {} heures", hours),
        }
    }

    pub fn days_ago(self, days: i64) -> String {
        match self {
            Locale::En => format!("{} days ago", days),
            Locale::Fr => format!("il y a {} jours", days),
        }
    }

    pub fn selection_count(self, count: usize) -> String {
        match self {
            Locale::En => format!("{} selected", count),
            Locale::Fr => format!("{} sélectionné(s)", count),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Fr => write!(f, "fr"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_display_matches_config_name() {
        assert_eq!(Locale::En.to_string(), "en");
        assert_eq!(Locale::Fr.to_string(), "fr");
    }

    #[test]
    fn test_relative_phrases() {
        assert_eq!(Locale::En.minutes_ago(5), "5 minutes ago");
        assert_eq!(Locale::Fr.hours_ago(2), "il y a 2 heures");
        assert_eq!(Locale::Fr.days_ago(3), "il y a 3 jours");
    }

    #[test]
    fn test_every_message_translated() {
        let all = [
            Message::ErrorLoadingBackups,
            Message::ErrorLoadingFiles,
            Message::ErrorDownload,
            Message::ErrorSelection,
            Message::NoBackups,
            Message::NoBackupSelected,
            Message::DownloadAction,
            Message::Loading,
            Message::EmptyDirectory,
            Message::Saved,
        ];
        for message in all {
            assert!(!Locale::En.text(message).is_empty());
            assert_ne!(Locale::En.text(message), Locale::Fr.text(message));
        }
    }
}
