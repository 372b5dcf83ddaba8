//! Property tests for the form session.

use chargecast_engine::{FormSession, Gender, IncompleteSelection, NumericField, Region, Smoker};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(NumericField, u16),
    Step(NumericField, i32),
    Gender(Gender),
    Smoker(Smoker),
    Region(Region),
}

fn field_strategy() -> impl Strategy<Value = NumericField> {
    prop::sample::select(NumericField::ALL.to_vec())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (field_strategy(), any::<u16>()).prop_map(|(f, v)| Op::Set(f, v)),
        (field_strategy(), -50i32..50).prop_map(|(f, d)| Op::Step(f, d)),
        prop::sample::select(vec![Gender::Male, Gender::Female]).prop_map(Op::Gender),
        prop::sample::select(vec![Smoker::Yes, Smoker::No]).prop_map(Op::Smoker),
        prop::sample::select(vec![
            Region::Northeast,
            Region::Northwest,
            Region::Southeast,
            Region::Southwest,
        ])
        .prop_map(Op::Region),
    ]
}

fn apply(session: &mut FormSession, op: &Op) {
    match *op {
        Op::Set(field, value) => {
            session.set_value(field, value);
        }
        Op::Step(field, delta) => {
            session.step_value(field, delta);
        }
        Op::Gender(g) => session.select_gender(g),
        Op::Smoker(s) => session.select_smoker(s),
        Op::Region(r) => session.select_region(r),
    }
}

proptest! {
    #[test]
    fn numeric_fields_stay_in_range(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut session = FormSession::new();
        for op in &ops {
            apply(&mut session, op);
            for field in NumericField::ALL {
                prop_assert!(field.range().contains(&session.value(field)));
            }
        }
    }

    #[test]
    fn submit_reports_first_missing_selection(ops in prop::collection::vec(op_strategy(), 0..16)) {
        let mut session = FormSession::new();
        for op in &ops {
            apply(&mut session, op);
        }
        let expected = if session.gender().is_none() {
            Some(IncompleteSelection::Gender)
        } else if session.smoker().is_none() {
            Some(IncompleteSelection::Smoker)
        } else if session.region().is_none() {
            Some(IncompleteSelection::Region)
        } else {
            None
        };
        prop_assert_eq!(session.submit().err(), expected);
    }

    #[test]
    fn last_selection_wins(choices in prop::collection::vec(prop::bool::ANY, 1..10)) {
        let mut session = FormSession::new();
        for yes in &choices {
            session.select_smoker(if *yes { Smoker::Yes } else { Smoker::No });
        }
        let last = if choices[choices.len() - 1] { Smoker::Yes } else { Smoker::No };
        prop_assert_eq!(session.smoker(), Some(last));
    }
}
