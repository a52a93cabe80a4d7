use crate::locator::Locator;
use crate::suite::TestSuite;

/// Either a loaded suite or a load error, paired with the locator that
/// produced it. Exactly one of the two states holds; a descriptor with an
/// error is never advanced to the filters or run controller.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub locator: Locator,
    pub outcome: DescriptorOutcome,
}

#[derive(Debug, Clone)]
pub enum DescriptorOutcome {
    Loaded(TestSuite),
    Failed(String),
}

impl Descriptor {
    #[must_use]
    pub fn suite(&self) -> Option<&TestSuite> {
        match &self.outcome {
            DescriptorOutcome::Loaded(suite) => Some(suite),
            DescriptorOutcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, DescriptorOutcome::Loaded(_))
    }
}
