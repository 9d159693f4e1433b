use crate::{
    automaton::{
        AutomatonLetter, AutomatonNode,
        dfa::{DFA, minimization::Minimizable},
        nfa::NFA,
    },
    config::AlgebraConfig,
    logger::{LogLevel, Logger},
};

/// Runs the language operations with optional logging and extra consistency
/// checks. The plain [`union_dfa`] and [`intersect_dfa`] functions use a
/// default runner.
pub struct LanguageOps<'l> {
    config: AlgebraConfig,
    logger: Option<&'l Logger>,
}

impl<'l> LanguageOps<'l> {
    pub fn new(config: AlgebraConfig, logger: Option<&'l Logger>) -> Self {
        LanguageOps { config, logger }
    }

    /// Computes the canonical minimal DFA for `L(a) ∪ L(b)`.
    pub fn union<NA: AutomatonNode, NB: AutomatonNode, S: AutomatonLetter>(
        &self,
        a: &NFA<NA, S>,
        b: &NFA<NB, S>,
    ) -> DFA<(), S> {
        let combined = a.union(b);
        let determinized = combined.determinize();

        if *self.config.get_debug_checks() {
            determinized.assert_complete();
        }

        let minimized = determinized.minimize();

        if let Some(l) = self.logger {
            l.object("Union")
                .add_field(
                    "operand states",
                    &format!("{} / {}", a.graph.node_count(), b.graph.node_count()),
                )
                .add_field("union states", &combined.graph.node_count().to_string())
                .add_field(
                    "determinized states",
                    &determinized.graph.node_count().to_string(),
                )
                .add_field(
                    "minimized states",
                    &minimized.graph.node_count().to_string(),
                )
                .log(LogLevel::Info);
        }

        minimized
    }

    /// Computes the canonical minimal DFA for `L(a) ∩ L(b)`.
    pub fn intersect<NA: AutomatonNode, NB: AutomatonNode, S: AutomatonLetter>(
        &self,
        a: &NFA<NA, S>,
        b: &NFA<NB, S>,
    ) -> DFA<(), S> {
        let left = a.determinize();
        let right = b.determinize();

        if *self.config.get_debug_checks() {
            left.assert_complete();
            right.assert_complete();
        }

        let product = left.intersect(&right);
        let minimized = product.minimize();

        if let Some(l) = self.logger {
            l.object("Intersection")
                .add_field(
                    "determinized states",
                    &format!(
                        "{} / {}",
                        left.graph.node_count(),
                        right.graph.node_count()
                    ),
                )
                .add_field("product states", &product.graph.node_count().to_string())
                .add_field(
                    "minimized states",
                    &minimized.graph.node_count().to_string(),
                )
                .log(LogLevel::Info);
        }

        minimized
    }
}

impl Default for LanguageOps<'_> {
    fn default() -> Self {
        LanguageOps::new(AlgebraConfig::default(), None)
    }
}

/// The canonical minimal DFA for `L(a) ∪ L(b)`.
pub fn union_dfa<NA: AutomatonNode, NB: AutomatonNode, S: AutomatonLetter>(
    a: &NFA<NA, S>,
    b: &NFA<NB, S>,
) -> DFA<(), S> {
    LanguageOps::default().union(a, b)
}

/// The canonical minimal DFA for `L(a) ∩ L(b)`.
pub fn intersect_dfa<NA: AutomatonNode, NB: AutomatonNode, S: AutomatonLetter>(
    a: &NFA<NA, S>,
    b: &NFA<NB, S>,
) -> DFA<(), S> {
    LanguageOps::default().intersect(a, b)
}
