//! Weighted scoring rules.
//!
//! A score is the sum of the weights of every rule whose predicate holds.
//! Rules are independent of one another, so evaluation order never changes
//! the total.

type Predicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

pub struct Rule<C> {
    pub name: &'static str,
    pub weight: f64,
    applies: Predicate<C>,
}

impl<C> Rule<C> {
    pub fn new<F>(name: &'static str, weight: f64, applies: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            weight,
            applies: Box::new(applies),
        }
    }

    #[must_use]
    pub fn applies(&self, ctx: &C) -> bool {
        (self.applies)(ctx)
    }
}

impl<C> std::fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct RuleSet<C> {
    rules: Vec<Rule<C>>,
}

impl<C> Default for RuleSet<C> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<C> RuleSet<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with<F>(mut self, name: &'static str, weight: f64, applies: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule::new(name, weight, applies));
        self
    }

    #[must_use]
    pub fn score(&self, ctx: &C) -> f64 {
        self.rules
            .iter()
            .filter(|rule| rule.applies(ctx))
            .map(|rule| rule.weight)
            .sum()
    }

    /// Names of the rules that hold for `ctx`, in declaration order.
    #[must_use]
    pub fn matching(&self, ctx: &C) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.applies(ctx))
            .map(|rule| rule.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RuleSet<i32> {
        RuleSet::new()
            .with("positive", 2.0, |n: &i32| *n > 0)
            .with("even", 1.5, |n: &i32| n % 2 == 0)
            .with("large", -3.0, |n: &i32| *n > 100)
    }

    #[test]
    fn test_sums_weights_of_matching_rules() {
        let rules = sample();
        assert_eq!(rules.score(&4), 3.5);
        assert_eq!(rules.score(&3), 2.0);
        assert_eq!(rules.score(&-1), 0.0);
        assert_eq!(rules.score(&102), 0.5);
    }

    #[test]
    fn test_reports_matching_rule_names_in_order() {
        let rules = sample();
        assert_eq!(rules.matching(&102), vec!["positive", "even", "large"]);
        assert!(rules.matching(&-1).is_empty());
    }
}
