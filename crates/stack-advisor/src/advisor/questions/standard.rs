use super::{Question, QuestionKind, ScoringKind};

const YES_NO: [&str; 2] = ["Yes", "No"];

pub(super) fn standard_questions() -> Vec<Question> {
    vec![
        Question {
            id: "needs_auth",
            text: "Does your project require authentication/login functionality?",
            description: Some("Auth features often guide framework and backend selection"),
            kind: QuestionKind::Boolean,
            answers: YES_NO.to_vec(),
            scoring: ScoringKind::AnyTag(&["auth", "firebase", "nextauth", "supabase", "django"]),
        },
        Question {
            id: "mobile_app",
            text: "Is your project intended to be mobile-first or a cross-platform app?",
            description: Some("Useful for distinguishing mobile vs web-first stacks"),
            kind: QuestionKind::Boolean,
            answers: YES_NO.to_vec(),
            scoring: ScoringKind::AnyTag(&["mobile", "flutter", "reactnative", "ionic"]),
        },
        Question {
            id: "interactive_ui",
            text: "Will the UI require high interactivity (like a dashboard or real-time UI)?",
            description: Some("Some frameworks are better for rich interactive experiences"),
            kind: QuestionKind::Boolean,
            answers: YES_NO.to_vec(),
            scoring: ScoringKind::AnyTag(&["react", "svelte", "vue", "websocket"]),
        },
        Question {
            id: "payment_integration",
            text: "Will your app include payment or checkout functionality?",
            description: Some("E-commerce and SaaS apps often require secure payment support"),
            kind: QuestionKind::Boolean,
            answers: YES_NO.to_vec(),
            scoring: ScoringKind::AnyTag(&["stripe", "commerce", "payment", "saas"]),
        },
        Question {
            id: "batteries_included",
            text: "Do you prefer a batteries-included framework with built-in tools?",
            description: Some("These frameworks include routing, auth, ORM, templating, etc."),
            kind: QuestionKind::Boolean,
            answers: YES_NO.to_vec(),
            scoring: ScoringKind::AnyTag(&["django", "rails", "laravel", "nextjs", "fullstack"]),
        },
        Question {
            id: "primary_focus",
            text: "Is this primarily a frontend/UI project?",
            description: Some(
                "This helps us understand if you need UI frameworks or backend services",
            ),
            kind: QuestionKind::Boolean,
            answers: YES_NO.to_vec(),
            scoring: ScoringKind::Tag("frontend"),
        },
        Question {
            id: "javascript_ecosystem",
            text: "Do you prefer the JavaScript/TypeScript ecosystem?",
            description: Some(
                "JavaScript has the largest ecosystem but other languages have their strengths",
            ),
            kind: QuestionKind::Boolean,
            answers: YES_NO.to_vec(),
            scoring: ScoringKind::AnyTag(&[
                "javascript",
                "typescript",
                "react",
                "nextjs",
                "nodejs",
            ]),
        },
        Question {
            id: "team_size",
            text: "Are you working solo or with a small team (< 5 people)?",
            description: Some("Smaller teams benefit from simpler, more integrated solutions"),
            kind: QuestionKind::Boolean,
            answers: vec!["Solo/Small team", "Large team"],
            scoring: ScoringKind::NameContainsAny(&[
                "t3",
                "create-react-app",
                "vite",
                "express",
                "flask",
            ]),
        },
        Question {
            id: "full_stack",
            text: "Do you need both frontend AND backend functionality?",
            description: Some(
                "Full-stack frameworks can be more productive for complete applications",
            ),
            kind: QuestionKind::Boolean,
            answers: vec!["Yes, full-stack", "No, just one"],
            scoring: ScoringKind::Tag("fullstack"),
        },
        Question {
            id: "database_needed",
            text: "Will your project need a database?",
            description: Some("This affects whether you need database integration and ORMs"),
            kind: QuestionKind::Boolean,
            answers: YES_NO.to_vec(),
            scoring: ScoringKind::AnyTag(&["database", "prisma", "mongodb", "sql"]),
        },
        Question {
            id: "complexity_preference",
            text: "Do you prefer simple, opinionated solutions?",
            description: Some("Opinionated frameworks are faster to start but less customizable"),
            kind: QuestionKind::Boolean,
            answers: vec!["Simple & opinionated", "Flexible & customizable"],
            scoring: ScoringKind::NameContainsAny(&["nextjs", "t3", "rails", "django", "laravel"]),
        },
        Question {
            id: "deployment_target",
            text: "Where will you primarily deploy?",
            description: None,
            kind: QuestionKind::Multiple,
            answers: vec![
                "Vercel/Netlify (Easy)",
                "AWS/GCP (Scalable)",
                "Self-hosted",
                "Mobile app stores",
            ],
            scoring: ScoringKind::TagRoutes {
                routes: &[
                    &["vercel", "netlify", "static", "jamstack"],
                    &["aws", "gcp", "kubernetes", "serverless"],
                    &["self-hosted", "docker"],
                    &["mobile"],
                ],
                fallback: 2,
            },
        },
    ]
}
