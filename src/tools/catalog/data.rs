//! Compiled-in GA4 dimension and metric catalogs.

/// Named items grouped by category, in presentation order.
#[derive(Debug)]
pub struct Catalog {
    /// Key used for the item-name list in category summaries.
    pub item_label: &'static str,
    pub categories: &'static [Category],
}

#[derive(Debug)]
pub struct Category {
    pub name: &'static str,
    /// `(api_name, description)` pairs.
    pub items: &'static [(&'static str, &'static str)],
}

impl Catalog {
    pub fn get(&self, name: &str) -> Option<&'static Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &'static str> {
        self.categories.iter().map(|category| category.name)
    }
}

impl Category {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_names(&self) -> impl Iterator<Item = &'static str> {
        self.items.iter().map(|(name, _)| *name)
    }
}

pub static GA4_DIMENSIONS: Catalog = Catalog {
    item_label: "dimensions",
    categories: &[
        Category {
            name: "time",
            items: &[
                ("date", "The date of the event in YYYYMMDD format."),
                ("dateHour", "The date and hour of the event in YYYYMMDDHH format."),
                ("day", "The day of the month (01-31)."),
                ("month", "The month of the year (01-12)."),
                ("year", "The year (e.g., 2024)."),
            ],
        },
        Category {
            name: "geography",
            items: &[
                ("city", "The city of the user."),
                ("country", "The country of the user."),
                ("region", "The region of the user."),
            ],
        },
        Category {
            name: "technology",
            items: &[
                ("browser", "The browser used by the user."),
                (
                    "deviceCategory",
                    "The category of the device (e.g., 'desktop', 'mobile', 'tablet').",
                ),
                ("operatingSystem", "The operating system of the user's device."),
            ],
        },
        Category {
            name: "traffic_source",
            items: &[
                ("source", "The source of the traffic."),
                ("medium", "The medium of the traffic source."),
                ("campaignName", "The name of the campaign."),
            ],
        },
        Category {
            name: "content",
            items: &[
                ("pagePath", "The path of the page (e.g., '/home')."),
                ("pageTitle", "The title of the page."),
            ],
        },
        Category {
            name: "events",
            items: &[("eventName", "The name of the event.")],
        },
        Category {
            name: "ecommerce",
            items: &[
                ("itemName", "The name of the item."),
                ("transactionId", "The ID of the transaction."),
            ],
        },
        Category {
            name: "user_demographics",
            items: &[("newVsReturning", "Whether the user is new or returning.")],
        },
    ],
};

pub static GA4_METRICS: Catalog = Catalog {
    item_label: "metrics",
    categories: &[
        Category {
            name: "user_metrics",
            items: &[
                ("totalUsers", "The total number of unique users."),
                (
                    "newUsers",
                    "The number of users who interacted with your site or app for the first time.",
                ),
                (
                    "activeUsers",
                    "The number of distinct users who have logged an engaged session on your site or app.",
                ),
            ],
        },
        Category {
            name: "session_metrics",
            items: &[
                ("sessions", "The total number of sessions."),
                ("bounceRate", "The percentage of sessions that were not engaged."),
                (
                    "averageSessionDuration",
                    "The average duration of a session in seconds.",
                ),
            ],
        },
        Category {
            name: "pageview_metrics",
            items: &[(
                "screenPageViews",
                "The total number of app screens or web pages your users saw.",
            )],
        },
        Category {
            name: "event_metrics",
            items: &[
                ("eventCount", "The total number of events."),
                ("conversions", "The total number of conversion events."),
            ],
        },
        Category {
            name: "ecommerce_metrics",
            items: &[
                ("totalRevenue", "The total revenue from all sources."),
                ("transactions", "The total number of transactions."),
            ],
        },
    ],
};
