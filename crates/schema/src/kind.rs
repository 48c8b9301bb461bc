use serde::{Deserialize, Serialize};

/// The closed set of document templates.
///
/// Exactly one kind is active per session. Routing uses the stable string
/// ids below; adding a kind is a compile-time extension (every dispatch on
/// this enum is an exhaustive match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Quote,
    Invoice,
    Resume,
    CoverLetter,
    PurchaseOrder,
    Certificate,
}

/// All kinds, in presentation order.
pub const ALL_KINDS: [DocumentKind; 6] = [
    DocumentKind::Quote,
    DocumentKind::Invoice,
    DocumentKind::Resume,
    DocumentKind::CoverLetter,
    DocumentKind::PurchaseOrder,
    DocumentKind::Certificate,
];

impl DocumentKind {
    /// Stable routing identifier.
    pub fn id(&self) -> &'static str {
        match self {
            DocumentKind::Quote => "devis",
            DocumentKind::Invoice => "facture",
            DocumentKind::Resume => "cv",
            DocumentKind::CoverLetter => "lettre_motivation",
            DocumentKind::PurchaseOrder => "bon_commande",
            DocumentKind::Certificate => "attestation",
        }
    }

    /// Human-facing template name, used in page headers and export filenames.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::Quote => "Devis Commercial",
            DocumentKind::Invoice => "Facture Simple",
            DocumentKind::Resume => "Curriculum Vitae",
            DocumentKind::CoverLetter => "Lettre de Motivation",
            DocumentKind::PurchaseOrder => "Bon de Commande",
            DocumentKind::Certificate => "Attestation Générique",
        }
    }

    pub fn from_id(id: &str) -> Option<DocumentKind> {
        ALL_KINDS.iter().copied().find(|k| k.id() == id)
    }

    /// SEO-friendly page slug: slugified display name suffixed with the id,
    /// e.g. `devis-commercial-devis`.
    pub fn route_slug(&self) -> String {
        format!("{}-{}", slug::slugify(self.display_name()), self.id())
    }

    /// Recovers the kind from a page slug by its trailing id segment.
    /// Returns `None` for unknown slugs; callers render the error
    /// placeholder in that case instead of failing.
    pub fn from_route_slug(slug: &str) -> Option<DocumentKind> {
        let id = slug.rsplit('-').next()?;
        Self::from_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for kind in ALL_KINDS {
            assert_eq!(DocumentKind::from_id(kind.id()), Some(kind));
        }
    }

    #[test]
    fn test_route_slug_round_trip() {
        for kind in ALL_KINDS {
            assert_eq!(DocumentKind::from_route_slug(&kind.route_slug()), Some(kind));
        }
        assert_eq!(
            DocumentKind::Quote.route_slug(),
            "devis-commercial-devis"
        );
    }

    #[test]
    fn test_unknown_slug_is_none() {
        assert_eq!(DocumentKind::from_route_slug("note-de-frais"), None);
        assert_eq!(DocumentKind::from_route_slug(""), None);
    }
}
