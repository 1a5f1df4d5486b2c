#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::models::{
        CapacityPolicy, ExecutionPatch, ExecutionStatus, ExecutionWithProgram, Limit, Program,
        ProgramExecution, ProgramType, MAX_SHOWN,
    };

    fn create_test_execution(show_order: Option<u8>, date: Option<Timestamp>) -> ProgramExecution {
        ProgramExecution {
            id: "exec-1".to_string(),
            program_id: "Morning_Study-2022-abc".to_string(),
            title: "Morning Study".to_string(),
            image: Some("/images/study.png".to_string()),
            date,
            status: ExecutionStatus::Upcoming,
            show_order,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
        }
    }

    fn create_test_program() -> Program {
        Program {
            id: "Morning_Study-2022-abc".to_string(),
            title: "Morning Study".to_string(),
            content: "<p>Read together</p>".to_string(),
            description: "A daily reading circle".to_string(),
            image: "/images/study.png".to_string(),
            program_type: ProgramType::Daily,
            custom_url: Some("morning-study".to_string()),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1641081600).unwrap(),
            executions: vec![create_test_execution(Some(1), None)],
        }
    }

    #[test]
    fn test_execution_display_unscheduled_and_unshown() {
        let execution = create_test_execution(None, None);
        let output = format!("{execution}");

        assert!(output.contains("### Morning Study (○ Upcoming)"));
        assert!(output.contains("- Date: Coming Soon"));
        assert!(output.contains("- Show order: not shown"));
        assert!(!execution.is_featured());
    }

    #[test]
    fn test_execution_display_featured() {
        let date = Timestamp::from_second(1641081600).unwrap();
        let execution = create_test_execution(Some(2), Some(date));
        let output = format!("{execution}");

        assert!(output.contains("- Show order: 2"));
        assert!(output.contains("- Date: 2022-01-0"));
        assert!(execution.is_featured());
    }

    #[test]
    fn test_program_display_with_executions() {
        let program = create_test_program();
        let output = format!("{program}");

        assert!(output.contains("# Morning Study"));
        assert!(output.contains("- Type: daily"));
        assert!(output.contains("- Custom URL: morning-study"));
        assert!(output.contains("A daily reading circle"));
        assert!(output.contains("## Executions"));
        assert!(output.contains("- Show order: 1"));
        // Rich text is stored, not rendered
        assert!(!output.contains("<p>"));
    }

    #[test]
    fn test_public_card_display() {
        let entry = ExecutionWithProgram {
            execution: create_test_execution(Some(1), None),
            program: create_test_program(),
        };
        let output = format!("{entry}");

        assert!(output.contains("### Morning Study"));
        assert!(output.contains("- Program: Morning Study (daily)"));
        assert!(output.contains("- Link: morning-study"));
        assert!(!output.contains("Show order"));
    }

    #[test]
    fn test_execution_serializes_with_program_flattened() {
        let entry = ExecutionWithProgram {
            execution: create_test_execution(Some(1), None),
            program: create_test_program(),
        };
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], "exec-1");
        assert_eq!(json["show_order"], 1);
        assert_eq!(json["program"]["type"], "daily");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("UPCOMING".parse(), Ok(ExecutionStatus::Upcoming));
        assert_eq!("done".parse(), Ok(ExecutionStatus::Done));
        assert_eq!("cancelled".parse(), Ok(ExecutionStatus::Canceled));
        assert!("archived".parse::<ExecutionStatus>().is_err());

        for status in [
            ExecutionStatus::Upcoming,
            ExecutionStatus::Done,
            ExecutionStatus::Canceled,
        ] {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
    }

    #[test]
    fn test_program_type_parsing() {
        assert_eq!("ANNUALY".parse(), Ok(ProgramType::Annually));
        assert_eq!("daily".parse(), Ok(ProgramType::Daily));
        assert!("weekly".parse::<ProgramType>().is_err());
    }

    #[test]
    fn test_limit_parsing_and_sql() {
        assert_eq!("ALL".parse(), Ok(Limit::All));
        assert_eq!("12".parse(), Ok(Limit::Count(12)));
        assert!("-1".parse::<Limit>().is_err());
        assert!("three".parse::<Limit>().is_err());

        assert_eq!(Limit::All.as_sql(), -1);
        assert_eq!(Limit::default(), Limit::Count(u32::from(MAX_SHOWN)));
        assert_eq!(Limit::Count(7).to_string(), "7");
    }

    #[test]
    fn test_count_based_policy_reuses_gaps() {
        let policy = CapacityPolicy::CountBased;
        assert_eq!(policy.next_slot(&[]), Some(1));
        assert_eq!(policy.next_slot(&[1, 2]), Some(3));
        assert_eq!(policy.next_slot(&[2, 3]), Some(1));
        assert_eq!(policy.next_slot(&[1, 2, 3]), None);
    }

    #[test]
    fn test_max_order_policy_appends() {
        let policy = CapacityPolicy::MaxOrderBased;
        assert_eq!(policy.next_slot(&[1]), Some(2));
        assert_eq!(policy.next_slot(&[2]), Some(3));
        assert_eq!(policy.next_slot(&[1, 2]), Some(3));
        // A single execution holding the last slot fills the list
        assert_eq!(policy.next_slot(&[3]), None);
    }

    #[test]
    fn test_capacity_policy_parsing() {
        assert_eq!("count".parse(), Ok(CapacityPolicy::CountBased));
        assert_eq!("Max-Order".parse(), Ok(CapacityPolicy::MaxOrderBased));
        assert!("fifo".parse::<CapacityPolicy>().is_err());
        assert_eq!(CapacityPolicy::default(), CapacityPolicy::CountBased);
    }

    #[test]
    fn test_execution_patch_constructors() {
        assert!(ExecutionPatch::default().is_empty());
        assert_eq!(ExecutionPatch::slot(2).show_order, Some(Some(2)));
        assert_eq!(ExecutionPatch::clear_slot().show_order, Some(None));
        assert!(!ExecutionPatch::clear_slot().is_empty());
        assert_eq!(
            ExecutionPatch::status(ExecutionStatus::Done).status,
            Some(ExecutionStatus::Done)
        );
    }
}
