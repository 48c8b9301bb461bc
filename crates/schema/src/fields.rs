//! Per-kind field tables.
//!
//! One ordered descriptor list per `DocumentKind`, mirroring the form layout:
//! sections group related fields, separators draw a visual break, and the
//! declared defaults seed a fresh `DocumentData` whenever the kind changes.

use crate::kind::DocumentKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    TextArea,
    Number,
    Date,
    Select,
    Color,
    Image,
    Separator,
}

impl FieldType {
    /// Text-like fields initialize to the empty string rather than to an
    /// absent value, so downstream line-splitting never sees a missing key.
    pub fn is_text_like(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::TextArea | FieldType::Select)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDefault {
    Text(&'static str),
    Number(f64),
}

fn no_options(options: &&'static [SelectOption]) -> bool {
    options.is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldDefault>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<&'static str>,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [SelectOption],
}

const fn field(
    id: &'static str,
    label: &'static str,
    field_type: FieldType,
    required: bool,
    section: Option<&'static str>,
) -> FieldDescriptor {
    FieldDescriptor { id, label, field_type, required, default: None, section, options: &[] }
}

const fn separator(id: &'static str) -> FieldDescriptor {
    field(id, "", FieldType::Separator, false, None)
}

const QUOTE_FIELDS: &[FieldDescriptor] = &[
    field("clientName", "Nom du Client", FieldType::Text, true, Some("Informations Client")),
    field("clientAddress", "Adresse du Client", FieldType::TextArea, true, Some("Informations Client")),
    field("clientSiret", "SIRET/TVA du Client", FieldType::Text, false, Some("Informations Client")),
    separator("separator1"),
    field("devisNumber", "Numéro de Devis", FieldType::Text, true, Some("Détails du Document")),
    field("devisDate", "Date du Devis", FieldType::Date, true, Some("Détails du Document")),
    FieldDescriptor {
        default: Some(FieldDefault::Number(30.0)),
        ..field("validityDays", "Validité de l'Offre (jours)", FieldType::Number, true, Some("Détails du Document"))
    },
    separator("separator2"),
    field("companyName", "Nom de l'Entreprise", FieldType::Text, true, Some("Informations Entreprise")),
    field("companySiret", "SIRET/TVA de l'Entreprise", FieldType::Text, true, Some("Informations Entreprise")),
    field("companyAddress", "Adresse de l'Entreprise", FieldType::TextArea, true, Some("Informations Entreprise")),
    field("serviceDescription", "Description des services (tableau)", FieldType::TextArea, true, Some("Description")),
    field("totalTTC", "Montant Total TTC", FieldType::Number, true, Some("Totaux")),
];

const INVOICE_FIELDS: &[FieldDescriptor] = &[
    field("clientName", "Nom du Client", FieldType::Text, true, Some("Informations Client")),
    field("invoiceNumber", "Numéro de Facture", FieldType::Text, true, Some("Détails du Document")),
    field("invoiceDate", "Date d'Émission", FieldType::Date, true, Some("Détails du Document")),
    field("dueDate", "Date d'échéance", FieldType::Date, true, Some("Détails du Document")),
    FieldDescriptor {
        options: &[
            SelectOption { value: "30_days", label: "30 jours" },
            SelectOption { value: "immediate", label: "Immédiat" },
        ],
        ..field("paymentTerms", "Conditions de Paiement", FieldType::Select, true, Some("Détails du Document"))
    },
    field("serviceDescription", "Description des produits/services", FieldType::TextArea, true, Some("Description")),
    field("totalTTC", "Montant Total TTC", FieldType::Number, true, Some("Totaux")),
];

const RESUME_FIELDS: &[FieldDescriptor] = &[
    field("fullName", "Nom Prénom", FieldType::Text, true, Some("Informations Personnelles")),
    field("title", "Titre (Ex: Développeur Senior)", FieldType::Text, true, Some("Informations Personnelles")),
    field("email", "Email", FieldType::Text, true, Some("Informations Personnelles")),
    field("phone", "Téléphone", FieldType::Text, false, Some("Informations Personnelles")),
    field("summary", "Profil / Résumé", FieldType::TextArea, true, Some("Contenu")),
    field("experience", "Expérience Professionnelle", FieldType::TextArea, true, Some("Contenu")),
    field("education", "Formation", FieldType::TextArea, true, Some("Contenu")),
    field("skills", "Compétences (Mots-clés)", FieldType::TextArea, false, Some("Contenu")),
];

const COVER_LETTER_FIELDS: &[FieldDescriptor] = &[
    field("recipientName", "Nom du Destinataire", FieldType::Text, true, Some("Destinataire")),
    field("recipientTitle", "Titre du Destinataire", FieldType::Text, true, Some("Destinataire")),
    field("jobTitle", "Intitulé du Poste", FieldType::Text, true, Some("Objet")),
    field("senderName", "Votre Nom", FieldType::Text, true, Some("Expéditeur")),
    field("senderCity", "Ville", FieldType::Text, true, Some("Expéditeur")),
    field("date", "Date de la Lettre", FieldType::Date, true, Some("Expéditeur")),
    field("bodyContent", "Corps de la Lettre", FieldType::TextArea, true, Some("Contenu")),
    FieldDescriptor {
        default: Some(FieldDefault::Text(
            "Je vous prie d'agréer, Madame, Monsieur, l'expression de mes salutations distinguées.",
        )),
        ..field("closingFormula", "Formule de Politesse", FieldType::TextArea, true, Some("Contenu"))
    },
];

const PURCHASE_ORDER_FIELDS: &[FieldDescriptor] = &[
    field("supplierName", "Nom du Fournisseur", FieldType::Text, true, Some("Informations Fournisseur")),
    field("orderNumber", "Numéro de Bon de Commande", FieldType::Text, true, Some("Détails du Document")),
    field("orderDate", "Date de Commande", FieldType::Date, true, Some("Détails du Document")),
    field("deliveryDate", "Date de Livraison Souhaitée", FieldType::Date, false, Some("Détails du Document")),
    field("itemsOrdered", "Articles Commandés (tableau)", FieldType::TextArea, true, Some("Description")),
    field("totalAmount", "Montant Total HT", FieldType::Number, true, Some("Totaux")),
];

const CERTIFICATE_FIELDS: &[FieldDescriptor] = &[
    field("purpose", "Objet de l'Attestation", FieldType::Text, true, Some("Objet")),
    field("personName", "Nom de la Personne Concernée", FieldType::Text, true, Some("Informations")),
    field("personDate", "Date de Naissance/Début", FieldType::Date, true, Some("Informations")),
    field("personRole", "Rôle/Qualité", FieldType::Text, true, Some("Informations")),
    field("attestationText", "Texte Libre de l'Attestation", FieldType::TextArea, true, Some("Contenu")),
    field("citySign", "Fait à (Ville)", FieldType::Text, true, Some("Signature")),
    field("dateSign", "Le (Date de Signature)", FieldType::Date, true, Some("Signature")),
];

/// Returns the static field schema of a document kind.
pub fn schema_for(kind: DocumentKind) -> &'static [FieldDescriptor] {
    match kind {
        DocumentKind::Quote => QUOTE_FIELDS,
        DocumentKind::Invoice => INVOICE_FIELDS,
        DocumentKind::Resume => RESUME_FIELDS,
        DocumentKind::CoverLetter => COVER_LETTER_FIELDS,
        DocumentKind::PurchaseOrder => PURCHASE_ORDER_FIELDS,
        DocumentKind::Certificate => CERTIFICATE_FIELDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ALL_KINDS;
    use std::collections::HashSet;

    #[test]
    fn test_every_kind_has_a_schema() {
        for kind in ALL_KINDS {
            assert!(!schema_for(kind).is_empty(), "{:?} has no fields", kind);
        }
    }

    #[test]
    fn test_field_ids_are_unique_per_kind() {
        for kind in ALL_KINDS {
            let mut seen = HashSet::new();
            for f in schema_for(kind) {
                assert!(seen.insert(f.id), "duplicate id {} in {:?}", f.id, kind);
            }
        }
    }

    #[test]
    fn test_invoice_payment_terms_options() {
        let terms = schema_for(DocumentKind::Invoice)
            .iter()
            .find(|f| f.id == "paymentTerms")
            .unwrap();
        assert_eq!(terms.field_type, FieldType::Select);
        assert_eq!(terms.options.len(), 2);
        assert_eq!(terms.options[0].value, "30_days");
    }

    #[test]
    fn test_declared_defaults() {
        let validity = schema_for(DocumentKind::Quote)
            .iter()
            .find(|f| f.id == "validityDays")
            .unwrap();
        assert_eq!(validity.default, Some(FieldDefault::Number(30.0)));

        let closing = schema_for(DocumentKind::CoverLetter)
            .iter()
            .find(|f| f.id == "closingFormula")
            .unwrap();
        assert!(matches!(closing.default, Some(FieldDefault::Text(_))));
    }
}
