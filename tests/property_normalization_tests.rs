use proptest::prelude::*;
use waterfall_rs::core::{
    NavigationTiming, PhaseInterval, ResourceTiming, TimingPhase, shorten_url,
    strip_query_and_fragment,
};
use waterfall_rs::render::NullSurface;
use waterfall_rs::{Waterfall, WaterfallConfig};

fn milestone() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0f64..5_000.0]
}

prop_compose! {
    fn arbitrary_resource()(
        start_time in 0.0f64..5_000.0,
        duration in -100.0f64..5_000.0,
        redirect_start in milestone(),
        redirect_end in milestone(),
        domain_lookup_start in milestone(),
        domain_lookup_end in milestone(),
        connect_start in milestone(),
        connect_end in milestone(),
        secure_connection_start in milestone(),
        request_start in milestone(),
        response_start in milestone(),
        response_end in milestone(),
    ) -> ResourceTiming {
        ResourceTiming {
            name: "https://example.com/resource".to_owned(),
            start_time,
            duration,
            redirect_start,
            redirect_end,
            domain_lookup_start,
            domain_lookup_end,
            connect_start,
            connect_end,
            secure_connection_start,
            request_start,
            response_start,
            response_end,
        }
    }
}

proptest! {
    #[test]
    fn every_phase_duration_is_non_negative(resource in arbitrary_resource()) {
        let record = resource.to_record();
        for phase in TimingPhase::DRAW_ORDER {
            let interval = record.phase(phase);
            prop_assert!(interval.duration >= 0.0);
            if !interval.is_present() {
                prop_assert_eq!(interval, PhaseInterval::ABSENT);
            }
        }
        prop_assert!(!record.phase(TimingPhase::AppCache).is_present());
    }

    #[test]
    fn ssl_is_present_only_with_secure_connection_start(resource in arbitrary_resource()) {
        let record = resource.to_record();
        let ssl = record.phase(TimingPhase::Ssl);
        if resource.secure_connection_start <= 0.0 {
            prop_assert!(!ssl.is_present());
        } else if resource.connect_end > resource.secure_connection_start {
            prop_assert_eq!(ssl.start, resource.secure_connection_start);
            prop_assert!((ssl.end() - resource.connect_end).abs() < 1e-9);
        }
    }

    #[test]
    fn redirect_is_absent_without_redirect_start(resource in arbitrary_resource()) {
        let record = resource.to_record();
        let redirect = record.phase(TimingPhase::Redirect);
        if resource.redirect_start == 0.0 {
            prop_assert_eq!(redirect, PhaseInterval::ABSENT);
        } else if resource.redirect_end > resource.redirect_start {
            prop_assert_eq!(redirect.start, resource.redirect_start);
        }
    }

    #[test]
    fn redacted_response_start_forces_zero_response(
        response_end in 0.0f64..10_000.0,
        request_start in 0.0f64..100.0,
    ) {
        let resource = ResourceTiming {
            name: "https://third-party.example/pixel.gif".to_owned(),
            request_start,
            response_start: 0.0,
            response_end,
            ..ResourceTiming::default()
        };
        let record = resource.to_record();
        prop_assert_eq!(record.phase(TimingPhase::Response), PhaseInterval::ABSENT);
    }

    #[test]
    fn navigation_rebasing_is_offset_invariant(
        origin in 1.0f64..1.0e12,
        dns in 0.0f64..50.0,
        connect in 0.0f64..50.0,
        wait in 1.0f64..500.0,
    ) {
        let origin = origin.round();
        let relative = NavigationTiming {
            navigation_start: 0.0,
            domain_lookup_start: 1.0,
            domain_lookup_end: 1.0 + dns.round(),
            connect_start: 1.0 + dns.round(),
            connect_end: 1.0 + dns.round() + connect.round(),
            request_start: 1.0 + dns.round() + connect.round(),
            response_start: 1.0 + dns.round() + connect.round() + wait.round(),
            response_end: 2.0 + dns.round() + connect.round() + wait.round(),
            ..NavigationTiming::default()
        };
        let shifted = NavigationTiming {
            navigation_start: origin,
            domain_lookup_start: origin + relative.domain_lookup_start,
            domain_lookup_end: origin + relative.domain_lookup_end,
            connect_start: origin + relative.connect_start,
            connect_end: origin + relative.connect_end,
            request_start: origin + relative.request_start,
            response_start: origin + relative.response_start,
            response_end: origin + relative.response_end,
            ..NavigationTiming::default()
        };

        prop_assert_eq!(relative.to_record("u"), shifted.to_record("u"));
    }

    #[test]
    fn url_shortening_bounds_length(path in "[a-z0-9/._-]{0,120}", query in "[a-z0-9=&]{0,30}") {
        let url = format!("https://example.com/{path}?{query}");
        let stripped = strip_query_and_fragment(&url);
        let shortened = shorten_url(&url);

        if stripped.chars().count() <= 40 {
            prop_assert_eq!(shortened.as_str(), stripped);
        } else {
            prop_assert!(shortened.chars().count() < stripped.chars().count());
            prop_assert!(shortened.starts_with(&stripped[..25]));
            prop_assert!(shortened.ends_with(&stripped[stripped.len() - 10..]));
            prop_assert!(shortened.contains(" ... "));
        }
    }

    #[test]
    fn any_collected_snapshot_draws_valid_primitives(
        resources in prop::collection::vec(arbitrary_resource(), 0..24),
        chart_width in 206u32..4000,
    ) {
        let mut snapshot = waterfall_rs::core::TimingSnapshot::new(
            "https://example.com/",
            NavigationTiming::default(),
        );
        for resource in resources {
            snapshot = snapshot.with_resource(resource);
        }
        let waterfall = Waterfall::new(WaterfallConfig::new(chart_width)).expect("waterfall");
        let records = waterfall.collect(&snapshot).expect("collect");
        let mut surface = NullSurface::default();

        prop_assert!(waterfall.draw(&records, &mut surface).is_ok());
        prop_assert_eq!(surface.group_count, records.len() * 2);
    }
}
