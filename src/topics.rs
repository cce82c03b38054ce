//! The fixed topic taxonomy shown on the setup screen. Selections are
//! descriptive only and never checked against a question bank.

pub struct TopicGroup {
    pub name: &'static str,
    pub topics: &'static [&'static str],
}

pub const TOPIC_GROUPS: &[TopicGroup] = &[
    TopicGroup {
        name: "Green Associate Core",
        topics: &[
            "LEED Process & Certification (LP)",
            "Integrative Strategies (IS)",
            "Project Surroundings & Public Outreach (PS)",
            "Synergies & Trade-offs (ST)",
            "Standards, Codes & Regulations (SC)",
            "Occupant Comfort & Education (OC)",
            "Performance Metrics & Reporting (PM)",
        ],
    },
    TopicGroup {
        name: "LEED AP BD+C Credits",
        topics: &[
            "Location & Transportation (LT)",
            "Sustainable Sites (SS)",
            "Water Efficiency (WE)",
            "Energy & Atmosphere (EA)",
            "Materials & Resources (MR)",
            "Indoor Environmental Quality (EQ)",
            "Innovation (IN)",
            "Regional Priority (RP)",
        ],
    },
];

/// All topics, flattened in display order.
pub fn all_topics() -> impl Iterator<Item = (&'static str, &'static str)> {
    TOPIC_GROUPS
        .iter()
        .flat_map(|group| group.topics.iter().map(move |t| (group.name, *t)))
}

pub fn topic_count() -> usize {
    TOPIC_GROUPS.iter().map(|g| g.topics.len()).sum()
}

/// Checkbox state for every topic, indexed in `all_topics` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicChecklist {
    checked: Vec<bool>,
}

impl Default for TopicChecklist {
    fn default() -> Self {
        Self {
            checked: vec![false; topic_count()],
        }
    }
}

impl TopicChecklist {
    pub fn toggle(&mut self, index: usize) {
        if let Some(c) = self.checked.get_mut(index) {
            *c = !*c;
        }
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Labels of the checked topics in display order.
    pub fn selected_labels(&self) -> Vec<String> {
        all_topics()
            .zip(self.checked.iter())
            .filter(|(_, checked)| **checked)
            .map(|((_, topic), _)| topic.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_shape() {
        assert_eq!(TOPIC_GROUPS.len(), 2);
        assert_eq!(TOPIC_GROUPS[0].topics.len(), 7);
        assert_eq!(TOPIC_GROUPS[1].topics.len(), 8);
        assert_eq!(topic_count(), 15);
    }

    #[test]
    fn test_all_topics_order() {
        let topics: Vec<_> = all_topics().collect();
        assert_eq!(
            topics[0],
            ("Green Associate Core", "LEED Process & Certification (LP)")
        );
        assert_eq!(topics[7], ("LEED AP BD+C Credits", "Location & Transportation (LT)"));
        assert_eq!(topics[14].1, "Regional Priority (RP)");
    }

    #[test]
    fn test_checklist_toggle() {
        let mut list = TopicChecklist::default();
        assert!(list.selected_labels().is_empty());

        list.toggle(2);
        list.toggle(9);
        assert!(list.is_checked(2));
        assert_eq!(
            list.selected_labels(),
            vec![
                "Project Surroundings & Public Outreach (PS)".to_string(),
                "Water Efficiency (WE)".to_string()
            ]
        );

        list.toggle(2);
        assert!(!list.is_checked(2));
        assert_eq!(list.selected_labels().len(), 1);
    }

    #[test]
    fn test_checklist_toggle_out_of_range() {
        let mut list = TopicChecklist::default();
        list.toggle(100);
        assert!(!list.is_checked(100));
        assert_eq!(list.len(), 15);
    }
}
