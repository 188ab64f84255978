//! # Assignment Tier Tests (T0-T3)
//!
//! If ANY tier fails, a run cannot be trusted.
//!
//! ## Tiers
//! - T0: Classification
//! - T1: Positional Cycling
//! - T2: Run Semantics (simulate / apply / failures)
//! - T3: Persistent Store End-to-End

use muster_core::{
    Assigner, AssignmentSink, AssignmentWrite, Battalion, Cadet, CadetId, CadetRecord, Cohort,
    Company, ErrorPolicy, MusterError, Plan, Platoon, RedbRoster, Roster, RosterSource,
    RosterStore, RunMode, WriteStatus, classify,
};

fn cadet(id: u64, gender: Option<&str>) -> Cadet {
    let c = Cadet::new(CadetId(id), "Cadet", format!("Name{id:05}"));
    match gender {
        Some(g) => c.with_gender(g),
        None => c,
    }
}

// =============================================================================
// TIER T0: CLASSIFICATION
// =============================================================================

mod t0_classification {
    use super::*;

    /// T0.1: Padding and case do not matter.
    #[test]
    fn padded_male_matches_plain_male() {
        assert_eq!(
            classify(&cadet(1, Some(" Male "))),
            classify(&cadet(2, Some("male")))
        );
    }

    /// T0.2: No gender and no battalion is undetermined and stays unset.
    #[test]
    fn blank_cadet_is_undetermined_and_keeps_null_battalion() {
        let plan = Plan::build(&[cadet(1, None)]).expect("plan");
        let result = plan.entries()[0].result;

        assert_eq!(result.cohort, Cohort::Undetermined);
        assert_eq!(result.battalion, None);
        assert_eq!(plan.entries()[0].resulting_battalion(), None);
    }

    /// T0.3: Existing battalion label places an unknown-gender cadet.
    #[test]
    fn existing_battalion_places_cadet() {
        let c = cadet(1, Some("?")).with_battalion("2nd Battalion");
        assert_eq!(classify(&c), Cohort::BattalionB);
    }
}

// =============================================================================
// TIER T1: POSITIONAL CYCLING
// =============================================================================

mod t1_cycling {
    use super::*;

    fn cohort_of_males(n: u64) -> Plan {
        let roster: Vec<Cadet> = (0..n).map(|i| cadet(i, Some("m"))).collect();
        Plan::build(&roster).expect("plan")
    }

    /// T1.1: 38 males, positions 0 and 37.
    #[test]
    fn thirty_eight_males() {
        let plan = cohort_of_males(38);
        let at = |i: usize| {
            let r = plan.entries()[i].result;
            (r.platoon, r.company, r.battalion)
        };

        assert_eq!(
            at(0),
            (Platoon::First, Company::ALPHA, Some(Battalion::First))
        );
        assert_eq!(
            at(37),
            (Platoon::Second, Company::ALPHA, Some(Battalion::First))
        );
    }

    /// T1.2: Block boundaries through the second company.
    #[test]
    fn block_boundaries() {
        let plan = cohort_of_males(148);
        let platoon = |i: usize| plan.entries()[i].result.platoon;
        let company = |i: usize| plan.entries()[i].result.company.label();

        for i in 0..=36 {
            assert_eq!(platoon(i), Platoon::First, "position {i}");
        }
        for i in 37..=73 {
            assert_eq!(platoon(i), Platoon::Second, "position {i}");
        }
        for i in 74..=110 {
            assert_eq!(platoon(i), Platoon::Third, "position {i}");
            assert_eq!(company(i), "Alpha");
        }
        for i in 111..=147 {
            assert_eq!(platoon(i), Platoon::First, "position {i}");
            assert_eq!(company(i), "Beta");
        }
    }

    /// T1.3: Company wraps back to Alpha at position 2886.
    #[test]
    fn company_wraps_at_2886() {
        let plan = cohort_of_males(2887);
        let last = plan.entries()[2886].result;
        let before = plan.entries()[2885].result;

        assert_eq!(before.company.label(), "Zulu");
        assert_eq!(last.company, Company::ALPHA);
        assert_eq!(last.platoon, Platoon::First);
    }

    /// T1.4: A female cohort restarts at Alpha even after 200 males.
    #[test]
    fn cohorts_have_independent_counters() {
        let mut roster: Vec<Cadet> = (0..200).map(|i| cadet(i, Some("m"))).collect();
        roster.push(cadet(500, Some("f")));
        roster.push(cadet(501, None));

        let plan = Plan::build(&roster).expect("plan");
        let female = plan
            .entries()
            .iter()
            .find(|e| e.cadet.id == CadetId(500))
            .expect("female");
        let blank = plan
            .entries()
            .iter()
            .find(|e| e.cadet.id == CadetId(501))
            .expect("blank");

        assert_eq!(female.result.position, 0);
        assert_eq!(female.result.company, Company::ALPHA);
        assert_eq!(blank.result.position, 0);
        assert_eq!(blank.result.platoon, Platoon::First);
    }
}

// =============================================================================
// TIER T2: RUN SEMANTICS
// =============================================================================

mod t2_runs {
    use super::*;

    /// Sink that rejects every write.
    struct BrokenSink;

    impl AssignmentSink for BrokenSink {
        fn store_assignment(&mut self, write: &AssignmentWrite) -> Result<(), MusterError> {
            Err(MusterError::CadetNotFound(write.cadet))
        }
    }

    fn populated() -> Roster {
        Roster::from_records((0..120).map(|i| {
            let gender = match i % 3 {
                0 => "M",
                1 => "female",
                _ => "",
            };
            CadetRecord::approved(CadetId(i), "Cadet", format!("Name{i:05}")).with_gender(gender)
        }))
        .expect("roster")
    }

    /// T2.1: Empty roster is a success with zero counts.
    #[test]
    fn empty_roster_zero_counts() {
        let mut roster = Roster::new();
        let run = Assigner::new()
            .run(&mut roster, RunMode::Apply)
            .expect("run");

        assert_eq!(run.summary.processed, 0);
        assert_eq!(run.summary.applied, 0);
        assert_eq!(run.summary.failed, 0);
        assert!(run.summary.is_clean());
    }

    /// T2.2: Simulation leaves the store untouched.
    #[test]
    fn simulation_writes_nothing() {
        let mut roster = populated();
        let before = roster.records().expect("records");

        let run = Assigner::new()
            .run(&mut roster, RunMode::Simulate)
            .expect("run");

        assert_eq!(run.summary.processed, 120);
        assert_eq!(run.plan.report_lines().len(), 120);
        assert_eq!(roster.records().expect("records"), before);
    }

    /// T2.3: Applying twice yields the same assignments.
    #[test]
    fn apply_is_idempotent() {
        let mut roster = populated();

        let first = Assigner::new()
            .run(&mut roster, RunMode::Apply)
            .expect("first run");
        let after_first = roster.records().expect("records");

        let second = Assigner::new()
            .run(&mut roster, RunMode::Apply)
            .expect("second run");
        let after_second = roster.records().expect("records");

        let a: Vec<_> = first.plan.results().copied().collect();
        let b: Vec<_> = second.plan.results().copied().collect();
        assert_eq!(a, b);
        assert_eq!(after_first, after_second);
    }

    /// T2.4: Every write failing still reports every cadet.
    #[test]
    fn failures_are_reported_per_cadet() {
        let roster: Vec<Cadet> = (0..10).map(|i| cadet(i, Some("f"))).collect();
        let plan = Plan::build(&roster).expect("plan");

        let run = Assigner::new().execute(plan, &mut BrokenSink, RunMode::Apply);

        assert_eq!(run.outcomes.len(), 10);
        assert_eq!(run.summary.failed, 10);
        assert_eq!(run.summary.applied, 0);
        assert!(
            run.outcomes
                .iter()
                .all(|o| matches!(o.status, WriteStatus::Failed(_)))
        );
    }

    /// T2.5: Abort policy stops after the first failure.
    #[test]
    fn abort_policy_stops_early() {
        let roster: Vec<Cadet> = (0..4).map(|i| cadet(i, Some("f"))).collect();
        let plan = Plan::build(&roster).expect("plan");

        let run = Assigner::with_policy(ErrorPolicy::Abort).execute(
            plan,
            &mut BrokenSink,
            RunMode::Apply,
        );

        assert_eq!(run.summary.failed, 1);
        assert_eq!(run.summary.skipped, 3);
    }
}

// =============================================================================
// TIER T3: PERSISTENT STORE END-TO-END
// =============================================================================

mod t3_persistent {
    use super::*;
    use tempfile::tempdir;

    /// T3.1: Apply against redb, reopen, and find the labels.
    #[test]
    fn apply_then_reopen() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("roster.redb");

        {
            let mut store = RedbRoster::open(&db_path).expect("open");
            store
                .enroll_batch(&[
                    CadetRecord::approved(CadetId(1), "Ana", "Reyes").with_gender("Female"),
                    CadetRecord::approved(CadetId(2), "Bo", "Abad").with_gender("M"),
                    CadetRecord::approved(CadetId(3), "Cy", "Uy").with_battalion("Reserve"),
                ])
                .expect("enroll");

            let run = Assigner::new()
                .run(&mut store, RunMode::Apply)
                .expect("run");
            assert_eq!(run.summary.applied, 3);
        }

        let store = RedbRoster::open(&db_path).expect("reopen");
        let ana = store.lookup(CadetId(1)).expect("lookup").expect("ana");
        let bo = store.lookup(CadetId(2)).expect("lookup").expect("bo");
        let cy = store.lookup(CadetId(3)).expect("lookup").expect("cy");

        assert_eq!(ana.battalion.as_deref(), Some("2nd Battalion"));
        assert_eq!(bo.battalion.as_deref(), Some("1st Battalion"));
        assert_eq!(cy.battalion.as_deref(), Some("Reserve"));
        assert_eq!(cy.platoon.as_deref(), Some("1st Platoon"));
        assert_eq!(cy.company.as_deref(), Some("Alpha"));
    }

    /// T3.2: Both stores produce the same roster order.
    #[test]
    fn stores_agree_on_order() {
        let temp = tempdir().expect("temp dir");
        let records = vec![
            CadetRecord::approved(CadetId(10), "zoe", "Cruz"),
            CadetRecord::approved(CadetId(11), "Amy", " cruz "),
            CadetRecord::approved(CadetId(12), "Ben", "Ang"),
        ];

        let memory = Roster::from_records(records.clone()).expect("memory");
        let mut disk = RedbRoster::open(temp.path().join("order.redb")).expect("open");
        disk.enroll_batch(&records).expect("enroll");

        let ids = |v: Vec<Cadet>| v.into_iter().map(|c| c.id.0).collect::<Vec<_>>();
        let expected = vec![12, 11, 10];
        assert_eq!(ids(memory.eligible_roster().expect("roster")), expected);
        assert_eq!(ids(disk.eligible_roster().expect("roster")), expected);
    }
}
