//! OR composition over tuples of terminations.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates when any child terminates.
///
/// ```
/// use shiftwise_solver::termination::{OrTermination, StepCountTermination};
///
/// let term = OrTermination((StepCountTermination::new(1000), None::<StepCountTermination>));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &SearchScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5);
