use crate::scenario::{PauseClass, Step};

/// The store-listing tour: webspaces list, all-sites view, drawer, one site's
/// webview, then the Work webspace. Site names double as drawer probes, so
/// the tour is parameterized on the seeded snapshot's names; new tours are
/// new step lists, not new code.
pub fn store_listing_tour(site_names: &[String]) -> Vec<Step> {
    // Any of the first few seeded sites is good enough to showcase a webview.
    let site_probes: Vec<String> = site_names.iter().take(4).cloned().collect();

    vec![
        Step::settle(PauseClass::Medium),
        Step::capture(1, "webspaces-list"),
        Step::tap(
            "All",
            vec![
                Step::settle(PauseClass::Long),
                Step::capture(2, "all-sites"),
            ],
        ),
        Step::VerifyDrawer {
            then: vec![
                Step::capture(3, "sites-drawer"),
                Step::tap_any(
                    site_probes,
                    vec![
                        Step::settle(PauseClass::Long),
                        Step::capture(4, "site-webview"),
                        Step::VerifyDrawer {
                            then: vec![Step::capture(5, "drawer-with-site")],
                        },
                        Step::CloseDrawer,
                    ],
                ),
            ],
        },
        Step::VerifyDrawer {
            then: vec![Step::tap_any(
                ["Back to Webspaces".to_string(), "Webspaces".to_string()],
                vec![
                    Step::settle(PauseClass::Medium),
                    Step::capture(6, "webspaces-overview"),
                    Step::tap(
                        "Work",
                        vec![
                            Step::settle(PauseClass::Long),
                            Step::capture(7, "work-webspace"),
                            Step::VerifyDrawer {
                                then: vec![Step::capture(8, "work-sites-drawer")],
                            },
                        ],
                    ),
                ],
            )],
        },
    ]
}
