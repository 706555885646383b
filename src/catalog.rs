use serde::Serialize;
use std::str::FromStr;

use crate::error::SimError;

/// Disposal category that decides which bin an item belongs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
pub enum CategoryTag {
    #[strum(serialize = "dry")]
    #[serde(rename = "dry")]
    Dry,
    #[strum(serialize = "wet")]
    #[serde(rename = "wet")]
    Wet,
    #[strum(serialize = "hazardous")]
    #[serde(rename = "hazardous")]
    Hazardous,
    #[strum(serialize = "e-waste")]
    #[serde(rename = "e-waste")]
    EWaste,
}

impl CategoryTag {
    pub const ALL: [CategoryTag; 4] = [
        CategoryTag::Dry,
        CategoryTag::Wet,
        CategoryTag::Hazardous,
        CategoryTag::EWaste,
    ];

    /// Heading of the bin this category drops into
    pub fn zone_title(&self) -> &'static str {
        match self {
            CategoryTag::Dry => "Dry Waste",
            CategoryTag::Wet => "Wet Waste",
            CategoryTag::Hazardous => "Hazardous Waste",
            CategoryTag::EWaste => "E-Waste",
        }
    }
}

impl FromStr for CategoryTag {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dry" => Ok(CategoryTag::Dry),
            "wet" => Ok(CategoryTag::Wet),
            "hazardous" => Ok(CategoryTag::Hazardous),
            "e-waste" | "ewaste" => Ok(CategoryTag::EWaste),
            _ => Err(SimError::InvalidCategory(s.to_string())),
        }
    }
}

/// Material group an item was authored under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum MaterialGroup {
    Plastic,
    Paper,
    Metal,
    Glass,
    Organic,
    Hazardous,
    Electronics,
    Textiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WasteItem {
    pub name: &'static str,
    pub category: CategoryTag,
    pub group: MaterialGroup,
    pub icon: &'static str,
    pub base_confidence: u8,
    pub material: &'static str,
    pub recycling: &'static str,
}

/// Finite, immutable set of known waste items
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<WasteItem>,
}

impl Catalog {
    /// Builds a catalog, rejecting an empty item list up front so detection never has to.
    pub fn new(items: Vec<WasteItem>) -> Result<Self, SimError> {
        if items.is_empty() {
            return Err(SimError::EmptyCatalog);
        }
        Ok(Self {
            items: items
                .into_iter()
                .map(|mut item| {
                    item.base_confidence = item.base_confidence.min(100);
                    item
                })
                .collect(),
        })
    }

    pub fn standard() -> Self {
        Self {
            items: STANDARD_ITEMS.to_vec(),
        }
    }

    pub fn all_items(&self) -> &[WasteItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&WasteItem> {
        self.items.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }

    pub fn in_group(&self, group: MaterialGroup) -> impl Iterator<Item = &WasteItem> {
        self.items.iter().filter(move |i| i.group == group)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

const fn item(
    name: &'static str,
    category: CategoryTag,
    group: MaterialGroup,
    icon: &'static str,
    base_confidence: u8,
    material: &'static str,
    recycling: &'static str,
) -> WasteItem {
    WasteItem {
        name,
        category,
        group,
        icon,
        base_confidence,
        material,
        recycling,
    }
}

use CategoryTag::{Dry, EWaste, Hazardous as Haz, Wet};
use MaterialGroup as G;

static STANDARD_ITEMS: [WasteItem; 67] = [
    // plastic
    item("PET Plastic Bottle (Water)", Dry, G::Plastic, "🥤", 98, "Polyethylene Terephthalate (C10H8O4)n", "♻️ Recyclable - RIC #1"),
    item("HDPE Plastic Container (Milk)", Dry, G::Plastic, "🥛", 97, "High-Density Polyethylene (C2H4)n", "♻️ Recyclable - RIC #2"),
    item("PVC Plastic Pipe", Dry, G::Plastic, "🔧", 96, "Polyvinyl Chloride (C2H3Cl)n", "⚠️ Limited Recycling - RIC #3"),
    item("LDPE Plastic Bag", Dry, G::Plastic, "🛍️", 95, "Low-Density Polyethylene (C2H4)n", "♻️ Recyclable - RIC #4"),
    item("PP Plastic Food Container", Dry, G::Plastic, "🍱", 97, "Polypropylene (C3H6)n", "♻️ Recyclable - RIC #5"),
    item("PS Plastic Cup (Styrofoam)", Dry, G::Plastic, "☕", 94, "Polystyrene (C8H8)n", "❌ Limited Recycling - RIC #6"),
    item("Plastic Straw", Dry, G::Plastic, "🥤", 93, "Polypropylene (C3H6)n", "♻️ Recyclable - RIC #5"),
    item("Plastic Cutlery", Dry, G::Plastic, "🍴", 92, "Polypropylene (C3H6)n", "♻️ Recyclable - RIC #5"),
    item("PET Food Tray", Dry, G::Plastic, "🍱", 96, "Polyethylene Terephthalate (C10H8O4)n", "♻️ Recyclable - RIC #1"),
    item("HDPE Detergent Bottle", Dry, G::Plastic, "🧴", 95, "High-Density Polyethylene (C2H4)n", "♻️ Recyclable - RIC #2"),
    // paper
    item("Corrugated Cardboard Box", Dry, G::Paper, "📦", 99, "Corrugated Fiberboard (C6H10O5)n", "♻️ Highly Recyclable - Paper Grade"),
    item("Office Paper (A4)", Dry, G::Paper, "📄", 98, "Wood Pulp Paper (C6H10O5)n", "♻️ Highly Recyclable - Paper Grade"),
    item("Newspaper", Dry, G::Paper, "📰", 97, "Newsprint Paper (C6H10O5)n", "♻️ Highly Recyclable - Paper Grade"),
    item("Magazine", Dry, G::Paper, "📖", 96, "Coated Paper (C6H10O5)n + Clay", "♻️ Recyclable - Paper Grade"),
    item("Paper Towel", Wet, G::Paper, "🧻", 95, "Tissue Paper (C6H10O5)n", "❌ Not Recyclable - Contaminated"),
    item("Paper Bag", Dry, G::Paper, "🛍️", 94, "Kraft Paper (C6H10O5)n", "♻️ Recyclable - Paper Grade"),
    item("Egg Carton", Dry, G::Paper, "🥚", 93, "Pulp Paper (C6H10O5)n", "♻️ Recyclable - Paper Grade"),
    item("Pizza Box", Dry, G::Paper, "🍕", 92, "Corrugated Cardboard (C6H10O5)n", "⚠️ Conditionally Recyclable - Clean Only"),
    item("Waxed Paper", Dry, G::Paper, "📄", 91, "Paper (C6H10O5)n + Paraffin Wax", "❌ Not Recyclable - Wax Coating"),
    // metal
    item("Aluminum Beverage Can", Dry, G::Metal, "🥤", 99, "Aluminum Alloy (Al + Mn + Mg)", "♻️ Highly Recyclable - Metal Grade"),
    item("Steel Food Can", Dry, G::Metal, "🥫", 98, "Tin-Coated Steel (Fe + Sn)", "♻️ Highly Recyclable - Metal Grade"),
    item("Aluminum Foil", Dry, G::Metal, "📄", 96, "Aluminum Foil (Al 99.5%)", "♻️ Recyclable - Metal Grade"),
    item("Metal Jar Lid", Dry, G::Metal, "🫙", 95, "Steel (Fe + C + Mn)", "♻️ Recyclable - Metal Grade"),
    item("Copper Wire", Dry, G::Metal, "🔌", 97, "Copper (Cu 99.9%)", "♻️ Highly Recyclable - Metal Grade"),
    item("Aluminum Food Tray", Dry, G::Metal, "🍱", 94, "Aluminum Alloy (Al + Si)", "♻️ Recyclable - Metal Grade"),
    item("Steel Nail", Dry, G::Metal, "🔨", 93, "Carbon Steel (Fe + C)", "♻️ Recyclable - Metal Grade"),
    // glass
    item("Clear Glass Bottle", Dry, G::Glass, "🍾", 99, "Soda-Lime Glass (SiO2 + Na2O + CaO)", "♻️ Highly Recyclable - Glass Grade"),
    item("Green Glass Bottle", Dry, G::Glass, "🍷", 98, "Soda-Lime Glass + Fe2O3 (Green)", "♻️ Highly Recyclable - Glass Grade"),
    item("Brown Glass Bottle", Dry, G::Glass, "🍺", 98, "Soda-Lime Glass + Fe2O3 (Brown)", "♻️ Highly Recyclable - Glass Grade"),
    item("Glass Jar", Dry, G::Glass, "🫙", 97, "Soda-Lime Glass (SiO2 + Na2O + CaO)", "♻️ Highly Recyclable - Glass Grade"),
    item("Light Bulb (LED)", EWaste, G::Glass, "💡", 95, "Glass + Electronics + Rare Earth Elements", "♻️ Specialized E-Waste Recycling"),
    item("Mirror", Dry, G::Glass, "🪞", 94, "Glass + Silver Coating + Paint", "❌ Not Recyclable - Coated Glass"),
    item("Window Glass", Dry, G::Glass, "🪟", 93, "Float Glass (SiO2 + Na2O + CaO)", "♻️ Recyclable - Glass Grade"),
    // organic
    item("Banana Peel", Wet, G::Organic, "🍌", 99, "Organic Fruit Waste (C6H10O5)n + K+", "♻️ Compostable - Organic Grade"),
    item("Apple Core", Wet, G::Organic, "🍎", 98, "Organic Fruit Waste (C6H10O5)n + Pectin", "♻️ Compostable - Organic Grade"),
    item("Vegetable Scraps", Wet, G::Organic, "🥬", 97, "Organic Vegetable Waste (C6H10O5)n + Cellulose", "♻️ Compostable - Organic Grade"),
    item("Coffee Grounds", Wet, G::Organic, "☕", 96, "Organic Coffee Waste (C8H10N4O2)n + N + P", "♻️ Compostable - Organic Grade"),
    item("Tea Bags", Wet, G::Organic, "🫖", 95, "Organic Tea Waste (C8H10N4O2)n + Tannins", "♻️ Compostable - Organic Grade"),
    item("Bread Crumbs", Wet, G::Organic, "🍞", 94, "Organic Bread Waste (C6H10O5)n + Gluten", "♻️ Compostable - Organic Grade"),
    item("Egg Shells", Wet, G::Organic, "🥚", 93, "Organic Egg Waste (CaCO3) + Protein", "♻️ Compostable - Organic Grade"),
    item("Orange Peel", Wet, G::Organic, "🍊", 92, "Organic Fruit Waste (C6H10O5)n + Limonene", "♻️ Compostable - Organic Grade"),
    item("Potato Peels", Wet, G::Organic, "🥔", 91, "Organic Vegetable Waste (C6H10O5)n + Starch", "♻️ Compostable - Organic Grade"),
    // hazardous
    item("Alkaline Battery (AA)", Haz, G::Hazardous, "🔋", 99, "Zinc-Manganese Dioxide (Zn + MnO2 + KOH)", "⚠️ Hazardous - Specialized Battery Recycling"),
    item("Lithium Battery (CR2032)", Haz, G::Hazardous, "🔋", 98, "Lithium Manganese Dioxide (Li + MnO2)", "⚠️ Hazardous - Specialized Battery Recycling"),
    item("Lead-Acid Battery", Haz, G::Hazardous, "🔋", 97, "Lead (Pb) + Sulfuric Acid (H2SO4)", "⚠️ Hazardous - Specialized Battery Recycling"),
    item("Mercury Thermometer", Haz, G::Hazardous, "🌡️", 96, "Mercury (Hg) + Glass (SiO2)", "⚠️ Hazardous - Specialized Hazardous Waste"),
    item("Paint Can (Oil-based)", Haz, G::Hazardous, "🎨", 95, "Oil Paint + Volatile Organic Compounds", "⚠️ Hazardous - Specialized Paint Recycling"),
    item("Pesticide Container", Haz, G::Hazardous, "🧪", 94, "Chemical Pesticides + Organophosphates", "⚠️ Hazardous - Specialized Chemical Waste"),
    item("Motor Oil Container", Haz, G::Hazardous, "🛢️", 93, "Used Motor Oil + Contaminants", "⚠️ Hazardous - Specialized Oil Recycling"),
    item("Fluorescent Light Bulb", Haz, G::Hazardous, "💡", 92, "Glass + Mercury (Hg) + Phosphor", "⚠️ Hazardous - Specialized Light Bulb Recycling"),
    item("Aerosol Can", Haz, G::Hazardous, "🧴", 91, "Aluminum + Propellant + Contents", "⚠️ Hazardous - Specialized Aerosol Recycling"),
    // electronics
    item("Smartphone", EWaste, G::Electronics, "📱", 99, "Plastic + Glass + Metals + Electronics + Rare Earth Elements", "♻️ Specialized E-Waste Recycling"),
    item("Laptop Computer", EWaste, G::Electronics, "💻", 98, "Plastic + Metal + Electronics + Lithium Battery", "♻️ Specialized E-Waste Recycling"),
    item("LED TV Screen", EWaste, G::Electronics, "📺", 97, "Glass + Plastic + Electronics + LED Components", "♻️ Specialized E-Waste Recycling"),
    item("Computer Mouse", EWaste, G::Electronics, "🖱️", 96, "Plastic + Electronics + Optical Sensors", "♻️ Specialized E-Waste Recycling"),
    item("USB Cable", EWaste, G::Electronics, "🔌", 95, "Copper + Plastic + Rubber + Shielding", "♻️ Specialized E-Waste Recycling"),
    item("Power Adapter", EWaste, G::Electronics, "🔌", 94, "Plastic + Metal + Electronics + Transformers", "♻️ Specialized E-Waste Recycling"),
    item("Headphones", EWaste, G::Electronics, "🎧", 93, "Plastic + Metal + Electronics + Speakers", "♻️ Specialized E-Waste Recycling"),
    item("Tablet Device", EWaste, G::Electronics, "📱", 92, "Glass + Plastic + Electronics + Touch Screen", "♻️ Specialized E-Waste Recycling"),
    item("Gaming Console", EWaste, G::Electronics, "🎮", 91, "Plastic + Metal + Electronics + Cooling Systems", "♻️ Specialized E-Waste Recycling"),
    // textiles
    item("Cotton T-Shirt", Dry, G::Textiles, "👕", 97, "100% Cotton Fabric (C6H10O5)n", "♻️ Recyclable - Textile Grade"),
    item("Denim Jeans", Dry, G::Textiles, "👖", 96, "Denim Cotton Fabric (C6H10O5)n + Indigo Dye", "♻️ Recyclable - Textile Grade"),
    item("Wool Sweater", Dry, G::Textiles, "🧥", 95, "Wool Fiber (Keratin Protein)", "♻️ Recyclable - Textile Grade"),
    item("Polyester Fabric", Dry, G::Textiles, "🧵", 94, "Synthetic Polyester Fiber (C10H8O4)n", "♻️ Recyclable - Textile Grade"),
    item("Leather Shoes", Dry, G::Textiles, "👟", 93, "Animal Leather (Collagen + Tanning Agents)", "♻️ Recyclable - Textile Grade"),
    item("Silk Scarf", Dry, G::Textiles, "🧣", 92, "Silk Fiber (Fibroin Protein)", "♻️ Recyclable - Textile Grade"),
    item("Nylon Stockings", Dry, G::Textiles, "🧦", 91, "Synthetic Nylon Fiber (C6H11NO)n", "♻️ Recyclable - Textile Grade"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn standard_catalog_has_eight_groups_and_four_tags() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 67);

        let groups = catalog.all_items().iter().map(|i| i.group).unique().count();
        assert_eq!(groups, 8);

        let tags = catalog.all_items().iter().map(|i| i.category).unique().count();
        assert_eq!(tags, 4);
    }

    #[test]
    fn authored_exceptions_keep_their_tags() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.find("Paper Towel").unwrap().category, CategoryTag::Wet);
        assert_eq!(
            catalog.find("Light Bulb (LED)").unwrap().category,
            CategoryTag::EWaste
        );
        assert_eq!(catalog.find("mirror").unwrap().category, CategoryTag::Dry);
    }

    #[test]
    fn group_mapping_matches_tags() {
        let catalog = Catalog::standard();
        assert!(catalog.in_group(MaterialGroup::Organic).all(|i| i.category == CategoryTag::Wet));
        assert!(catalog
            .in_group(MaterialGroup::Hazardous)
            .all(|i| i.category == CategoryTag::Hazardous));
        assert!(catalog
            .in_group(MaterialGroup::Electronics)
            .all(|i| i.category == CategoryTag::EWaste));
        assert_eq!(catalog.in_group(MaterialGroup::Plastic).count(), 10);
    }

    #[test]
    fn base_confidence_in_range() {
        assert!(Catalog::standard()
            .all_items()
            .iter()
            .all(|i| i.base_confidence <= 100));
    }

    #[test]
    fn all_items_is_restartable() {
        let catalog = Catalog::standard();
        let first: Vec<_> = catalog.all_items().iter().map(|i| i.name).collect();
        let second: Vec<_> = catalog.all_items().iter().map(|i| i.name).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_catalog_rejected() {
        assert_eq!(Catalog::new(vec![]).unwrap_err(), SimError::EmptyCatalog);
    }

    #[test]
    fn category_parsing() {
        assert_eq!("dry".parse::<CategoryTag>(), Ok(CategoryTag::Dry));
        assert_eq!(" E-Waste ".parse::<CategoryTag>(), Ok(CategoryTag::EWaste));
        assert_eq!(
            "compost".parse::<CategoryTag>(),
            Err(SimError::InvalidCategory("compost".to_string()))
        );
        assert_eq!(CategoryTag::EWaste.to_string(), "e-waste");
        assert_eq!(CategoryTag::Hazardous.zone_title(), "Hazardous Waste");
    }
}
