use std::borrow::Cow;

use wastewise_core::SegregationTip;

/// General segregation tips, always returned in this order.
pub static GENERAL_TIPS: &[SegregationTip] = &[
    SegregationTip {
        title: Cow::Borrowed("Segregate at Source"),
        description: "Keep recyclable, organic, and hazardous waste separate from the start",
        impact: "Makes processing more efficient",
    },
    SegregationTip {
        title: Cow::Borrowed("Clean Your Recyclables"),
        description: "Rinse plastic, glass, and metal containers before recycling",
        impact: "Reduces contamination, improves recycling quality",
    },
    SegregationTip {
        title: Cow::Borrowed("Compost Organic Waste"),
        description: "Use food and garden waste for composting to create soil",
        impact: "Reduces methane emissions from landfills",
    },
    SegregationTip {
        title: Cow::Borrowed("Know What's Hazardous"),
        description: "Never put batteries, chemicals, or electronics in regular bins",
        impact: "Prevents environmental contamination",
    },
    SegregationTip {
        title: Cow::Borrowed("Flatten Large Items"),
        description: "Crush boxes and flatten containers to save bin space",
        impact: "Optimizes collection efficiency",
    },
    SegregationTip {
        title: Cow::Borrowed("Check Local Guidelines"),
        description: "Waste rules vary by location. Know your local requirements.",
        impact: "Ensures proper disposal per local standards",
    },
];

/// Title-case an identifier: `food_waste` → `Food_Waste`, `plastic` → `Plastic`.
///
/// Every alphabetic character following a non-alphabetic one (or the start)
/// is upper-cased, the rest lower-cased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut boundary = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_general_tips() {
        assert_eq!(GENERAL_TIPS.len(), 6);
        assert_eq!(GENERAL_TIPS[0].title, "Segregate at Source");
        assert_eq!(GENERAL_TIPS[5].title, "Check Local Guidelines");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("plastic"), "Plastic");
        assert_eq!(title_case("food_waste"), "Food_Waste");
        assert_eq!(title_case("e-WASTE"), "E-Waste");
        assert_eq!(title_case(""), "");
    }
}
