//! Localization context.
//!
//! A [`Localizer`] is constructed once at start-up for the chosen [`Locale`]
//! and handed to whatever renders text. There is no global instance.

use std::fmt;
use std::str::FromStr;

use groundwork_types::{Field, ValidationIssue};

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Self::En),
            "es" | "es-us" | "es-mx" => Ok(Self::Es),
            other => Err(ConfigError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// Identifiers for every user-visible string outside field labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    AppTitle,
    NavHome,
    NavContact,
    NavQuote,
    NavAdmin,
    HomeHint,
    ContactTitle,
    QuoteTitle,
    EditProspectTitle,
    NewProspectTitle,
    SubmitHint,
    SubmitButton,
    Loading,
    Submitting,
    Suggestions,
    IncompleteForm,
    SubmitFailed,
    SubmitSucceeded,
    LoadFailed,
    DeleteFailed,
    ConfirmDelete,
    ProspectsTitle,
    ProspectsEmpty,
    FilterPlaceholder,
    AdminHint,
    ColumnContactDate,
    ServicesTitle,
    ServiceNewHomes,
    ServiceNewHomesBody,
    ServiceRemodeling,
    ServiceRemodelingBody,
    ServiceAdditions,
    ServiceAdditionsBody,
    FaqTitle,
    FaqEstimateQuestion,
    FaqEstimateAnswer,
    FaqPermitsQuestion,
    FaqPermitsAnswer,
    FaqTimelineQuestion,
    FaqTimelineAnswer,
    ContactUsTitle,
    NoticeTitle,
    DismissHint,
    ValidationRequired,
    ValidationEmail,
    ValidationPhone,
}

/// Translates [`MessageKey`]s and field names for one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Localizer {
    locale: Locale,
}

impl Localizer {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Text for `key`. Spanish falls back to English for untranslated keys.
    pub fn text(&self, key: MessageKey) -> &'static str {
        match self.locale {
            Locale::En => english(key),
            Locale::Es => spanish(key).unwrap_or_else(|| english(key)),
        }
    }

    pub fn field_label(&self, field: Field) -> &'static str {
        match self.locale {
            Locale::En => english_field(field),
            Locale::Es => spanish_field(field),
        }
    }

    pub fn validation_message(&self, issue: ValidationIssue) -> &'static str {
        let key = match issue {
            ValidationIssue::Required => MessageKey::ValidationRequired,
            ValidationIssue::InvalidEmail => MessageKey::ValidationEmail,
            ValidationIssue::InvalidPhone => MessageKey::ValidationPhone,
        };
        self.text(key)
    }
}

fn english(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        AppTitle => "Groundwork Builders",
        NavHome => "Home",
        NavContact => "Contact",
        NavQuote => "Quote",
        NavAdmin => "Prospects",
        HomeHint => "←/→ select  Enter open  1-4 jump  q quit",
        ContactTitle => "Contact us",
        QuoteTitle => "Request a quote",
        EditProspectTitle => "Edit prospect",
        NewProspectTitle => "New prospect",
        SubmitHint => "Tab/Shift+Tab move  Enter submit  Esc back",
        SubmitButton => "Send",
        Loading => "Loading…",
        Submitting => "Sending…",
        Suggestions => "Suggestions",
        IncompleteForm => "Please complete the required fields.",
        SubmitFailed => "We could not send your information. Please try again.",
        SubmitSucceeded => "Thank you! We will be in touch soon.",
        LoadFailed => "The prospect could not be loaded.",
        DeleteFailed => "The prospect could not be deleted.",
        ConfirmDelete => "Delete this prospect? (y/n)",
        ProspectsTitle => "Prospects",
        ProspectsEmpty => "No prospects to show.",
        FilterPlaceholder => "Type to filter",
        AdminHint => "/ filter  s sort  r reverse  n new  e edit  d delete  Esc back",
        ColumnContactDate => "Contacted",
        ServicesTitle => "Services",
        ServiceNewHomes => "Custom homes",
        ServiceNewHomesBody => "Ground-up construction designed around how you live.",
        ServiceRemodeling => "Remodeling",
        ServiceRemodelingBody => "Kitchens, baths and whole-home renovations.",
        ServiceAdditions => "Additions",
        ServiceAdditionsBody => "More room without moving: second stories, suites and garages.",
        FaqTitle => "Frequently asked questions",
        FaqEstimateQuestion => "Is the estimate free?",
        FaqEstimateAnswer => "Yes. We visit the site and send a written estimate at no cost.",
        FaqPermitsQuestion => "Do you handle permits?",
        FaqPermitsAnswer => "We pull every permit and schedule all inspections.",
        FaqTimelineQuestion => "How long does a remodel take?",
        FaqTimelineAnswer => "Most kitchen and bath projects finish in six to ten weeks.",
        ContactUsTitle => "Reach us",
        NoticeTitle => "Notice",
        DismissHint => "Press Enter to continue",
        ValidationRequired => "This field is required",
        ValidationEmail => "Enter a valid email address",
        ValidationPhone => "Enter a valid phone number",
    }
}

fn spanish(key: MessageKey) -> Option<&'static str> {
    use MessageKey::*;
    let text = match key {
        NavHome => "Inicio",
        NavContact => "Contacto",
        NavQuote => "Cotización",
        NavAdmin => "Prospectos",
        HomeHint => "←/→ elegir  Enter abrir  1-4 saltar  q salir",
        ContactTitle => "Contáctenos",
        QuoteTitle => "Solicite una cotización",
        EditProspectTitle => "Editar prospecto",
        NewProspectTitle => "Nuevo prospecto",
        SubmitHint => "Tab/Shift+Tab mover  Enter enviar  Esc volver",
        SubmitButton => "Enviar",
        Loading => "Cargando…",
        Submitting => "Enviando…",
        Suggestions => "Sugerencias",
        IncompleteForm => "Por favor complete los campos obligatorios.",
        SubmitFailed => "No pudimos enviar su información. Inténtelo de nuevo.",
        SubmitSucceeded => "¡Gracias! Nos comunicaremos pronto.",
        LoadFailed => "No se pudo cargar el prospecto.",
        DeleteFailed => "No se pudo eliminar el prospecto.",
        ConfirmDelete => "¿Eliminar este prospecto? (s/n)",
        ProspectsTitle => "Prospectos",
        ProspectsEmpty => "No hay prospectos.",
        FilterPlaceholder => "Escriba para filtrar",
        ColumnContactDate => "Contactado",
        ServicesTitle => "Servicios",
        ServiceNewHomes => "Casas a medida",
        ServiceRemodeling => "Remodelación",
        ServiceAdditions => "Ampliaciones",
        FaqTitle => "Preguntas frecuentes",
        FaqEstimateQuestion => "¿El presupuesto es gratis?",
        FaqEstimateAnswer => "Sí. Visitamos el sitio y enviamos un presupuesto escrito sin costo.",
        ContactUsTitle => "Contáctenos",
        NoticeTitle => "Aviso",
        DismissHint => "Presione Enter para continuar",
        ValidationRequired => "Este campo es obligatorio",
        ValidationEmail => "Ingrese un correo válido",
        ValidationPhone => "Ingrese un teléfono válido",
        _ => return None,
    };
    Some(text)
}

fn english_field(field: Field) -> &'static str {
    match field {
        Field::Name => "First name",
        Field::LastName => "Last name",
        Field::Email => "Email",
        Field::Phone => "Phone",
        Field::Address => "Address",
        Field::City => "City",
        Field::State => "State",
        Field::Postal => "ZIP code",
        Field::Message => "Message",
        Field::Company => "Company",
        Field::Country => "Country",
        Field::Website => "Website",
        Field::ServiceType => "Service",
        Field::Link => "Plans link",
        Field::ReturnFormat => "Preferred reply",
        Field::Quantity => "Quantity",
        Field::DeliveryTime => "Desired timeline",
    }
}

fn spanish_field(field: Field) -> &'static str {
    match field {
        Field::Name => "Nombre",
        Field::LastName => "Apellido",
        Field::Email => "Correo",
        Field::Phone => "Teléfono",
        Field::Address => "Dirección",
        Field::City => "Ciudad",
        Field::State => "Estado",
        Field::Postal => "Código postal",
        Field::Message => "Mensaje",
        Field::Company => "Empresa",
        Field::Country => "País",
        Field::Website => "Sitio web",
        Field::ServiceType => "Servicio",
        Field::Link => "Enlace de planos",
        Field::ReturnFormat => "Respuesta preferida",
        Field::Quantity => "Cantidad",
        Field::DeliveryTime => "Plazo deseado",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_codes_parse() {
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("es-MX".parse::<Locale>(), Ok(Locale::Es));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn spanish_falls_back_to_english() {
        let localizer = Localizer::new(Locale::Es);
        assert_eq!(localizer.text(MessageKey::NavHome), "Inicio");
        assert_eq!(localizer.text(MessageKey::AppTitle), english(MessageKey::AppTitle));
    }

    #[test]
    fn validation_messages_follow_locale() {
        let localizer = Localizer::new(Locale::En);
        assert_eq!(localizer.validation_message(ValidationIssue::Required), "This field is required");
        assert_eq!(localizer.field_label(Field::Postal), "ZIP code");
    }
}
