//! Read-only catalogs consumed by the booking flow.
//!
//! Catalogs are configuration, not constants baked into the core: they are
//! constructed once (typically via the `standard` builders) and injected
//! through the environment so tests can swap them out.

use crate::types::{AddonId, EventType, Money, ThemeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An optional paid extra with a fixed price
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// Stable identifier
    pub id: AddonId,
    /// Display name
    pub name: String,
    /// Fixed price
    pub price: Money,
}

impl Addon {
    /// Creates an add-on entry
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: AddonId::new(id),
            name: name.into(),
            price,
        }
    }
}

/// Ordered, read-only list of bookable add-ons
///
/// Defined once at startup and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonCatalog {
    addons: Vec<Addon>,
}

impl AddonCatalog {
    /// Creates a catalog from a list of add-ons
    #[must_use]
    pub const fn new(addons: Vec<Addon>) -> Self {
        Self { addons }
    }

    /// The standard add-on lineup
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Addon::new("photo", "Photography Package", Money::from_dollars(499)),
            Addon::new("catering", "Premium Catering", Money::from_dollars(899)),
            Addon::new("music", "Live Music", Money::from_dollars(699)),
            Addon::new("decor", "Extra Decorations", Money::from_dollars(299)),
        ])
    }

    /// Looks up an add-on by id
    #[must_use]
    pub fn get(&self, id: &AddonId) -> Option<&Addon> {
        self.addons.iter().find(|addon| addon.id == *id)
    }

    /// Whether the catalog holds the given id
    #[must_use]
    pub fn contains(&self, id: &AddonId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over the add-ons in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Addon> {
        self.addons.iter()
    }

    /// Number of add-ons
    #[must_use]
    pub fn len(&self) -> usize {
        self.addons.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addons.is_empty()
    }
}

impl<'a> IntoIterator for &'a AddonCatalog {
    type Item = &'a Addon;
    type IntoIter = std::slice::Iter<'a, Addon>;

    fn into_iter(self) -> Self::IntoIter {
        self.addons.iter()
    }
}

/// A selectable theme with its display label
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeOption {
    /// Stable identifier
    pub id: ThemeId,
    /// Display label
    pub label: String,
}

impl ThemeOption {
    /// Creates a theme option
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: ThemeId::new(id),
            label: label.into(),
        }
    }
}

/// Read-only mapping from event type to its curated themes
///
/// Event types without an entry (notably [`EventType::Other`]) have an empty
/// theme domain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeCatalog {
    options: BTreeMap<EventType, Vec<ThemeOption>>,
}

impl ThemeCatalog {
    /// Creates a catalog from an event-type-to-themes mapping
    #[must_use]
    pub const fn new(options: BTreeMap<EventType, Vec<ThemeOption>>) -> Self {
        Self { options }
    }

    /// The standard theme table
    #[must_use]
    pub fn standard() -> Self {
        let mut options = BTreeMap::new();
        options.insert(
            EventType::Wedding,
            vec![
                ThemeOption::new("classic-elegance", "Classic Elegance"),
                ThemeOption::new("rustic-romance", "Rustic Romance"),
                ThemeOption::new("garden-bliss", "Garden Bliss"),
                ThemeOption::new("modern-minimalist", "Modern Minimalist"),
                ThemeOption::new("fairytale-fantasy", "Fairytale Fantasy"),
            ],
        );
        options.insert(
            EventType::Birthday,
            vec![
                ThemeOption::new("vintage-carnival", "Vintage Carnival"),
                ThemeOption::new("tropical-paradise", "Tropical Paradise"),
                ThemeOption::new("glamorous-gold", "Glamorous Gold"),
                ThemeOption::new("neon-nights", "Neon Nights"),
                ThemeOption::new("cosmic-adventure", "Cosmic Adventure"),
            ],
        );
        options.insert(
            EventType::Corporate,
            vec![
                ThemeOption::new("tech-innovation", "Tech Innovation"),
                ThemeOption::new("classic-professional", "Classic Professional"),
                ThemeOption::new("creative-collaboration", "Creative Collaboration"),
                ThemeOption::new("sustainable-future", "Sustainable Future"),
                ThemeOption::new("industrial-chic", "Industrial Chic"),
            ],
        );
        options.insert(
            EventType::Anniversary,
            vec![
                ThemeOption::new("romantic-reminiscence", "Romantic Reminiscence"),
                ThemeOption::new("enchanted-evening", "Enchanted Evening"),
                ThemeOption::new("globe-trotters", "Globe Trotters"),
                ThemeOption::new("platinum-celebration", "Platinum Celebration"),
                ThemeOption::new("retro-revival", "Retro Revival"),
            ],
        );
        Self::new(options)
    }

    /// Themes selectable for the given event type, in display order
    #[must_use]
    pub fn themes_for(&self, event_type: EventType) -> &[ThemeOption] {
        self.options
            .get(&event_type)
            .map_or(&[], Vec::as_slice)
    }

    /// Whether the theme belongs to the event type's domain
    #[must_use]
    pub fn contains(&self, event_type: EventType, theme: &ThemeId) -> bool {
        self.themes_for(event_type)
            .iter()
            .any(|option| option.id == *theme)
    }

    /// Display label for a theme, searched across all event types
    #[must_use]
    pub fn label_for(&self, theme: &ThemeId) -> Option<&str> {
        self.options
            .values()
            .flatten()
            .find(|option| option.id == *theme)
            .map(|option| option.label.as_str())
    }
}

/// An event type with its display label, as the selection UI consumes it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeOption {
    /// Stable identifier
    pub value: EventType,
    /// Display label
    pub label: String,
}

/// The event type options, in display order
#[must_use]
pub fn event_type_options() -> Vec<EventTypeOption> {
    EventType::ALL
        .into_iter()
        .map(|value| EventTypeOption {
            value,
            label: value.label().to_string(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn standard_addon_catalog_has_four_entries() {
        let catalog = AddonCatalog::standard();
        assert_eq!(catalog.len(), 4);

        let photo = catalog.get(&AddonId::new("photo")).unwrap();
        assert_eq!(photo.name, "Photography Package");
        assert_eq!(photo.price, Money::from_dollars(499));

        assert!(catalog.contains(&AddonId::new("decor")));
        assert!(!catalog.contains(&AddonId::new("fireworks")));
    }

    #[test]
    fn standard_theme_catalog_covers_curated_event_types() {
        let catalog = ThemeCatalog::standard();
        for event_type in [
            EventType::Wedding,
            EventType::Birthday,
            EventType::Corporate,
            EventType::Anniversary,
        ] {
            assert_eq!(catalog.themes_for(event_type).len(), 5);
        }
        assert!(catalog.themes_for(EventType::Other).is_empty());
    }

    #[test]
    fn theme_domains_do_not_overlap() {
        let catalog = ThemeCatalog::standard();
        let garden = ThemeId::new("garden-bliss");
        assert!(catalog.contains(EventType::Wedding, &garden));
        assert!(!catalog.contains(EventType::Birthday, &garden));
    }

    #[test]
    fn theme_labels_resolve_across_event_types() {
        let catalog = ThemeCatalog::standard();
        assert_eq!(
            catalog.label_for(&ThemeId::new("neon-nights")),
            Some("Neon Nights")
        );
        assert_eq!(catalog.label_for(&ThemeId::new("missing")), None);
    }

    #[test]
    fn event_type_options_follow_display_order() {
        let options = event_type_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].value, EventType::Wedding);
        assert_eq!(options[0].label, "Wedding");
        assert_eq!(options[2].label, "Corporate Event");
    }
}
