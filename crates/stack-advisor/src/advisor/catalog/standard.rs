use super::super::domain::Candidate;

struct StackTemplate {
    name: &'static str,
    description: &'static str,
    url: &'static str,
    tags: &'static [&'static str],
    reasons: &'static [&'static str],
}

impl StackTemplate {
    fn to_candidate(&self) -> Candidate {
        Candidate {
            name: self.name.to_string(),
            description: self.description.to_string(),
            url: self.url.to_string(),
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
            reasons: if self.reasons.is_empty() {
                None
            } else {
                Some(self.reasons.iter().map(|reason| reason.to_string()).collect())
            },
        }
    }
}

const STANDARD_STACKS: &[StackTemplate] = &[
    StackTemplate {
        name: "T3 Stack",
        description: "Typesafe full-stack Next.js starter with tRPC, Prisma and NextAuth.",
        url: "https://create.t3.gg",
        tags: &["fullstack", "typescript", "nextjs", "react", "prisma", "nextauth", "database", "saas", "vercel"],
        reasons: &[
            "End-to-end type safety from database to UI",
            "Auth, ORM and API layer wired up on day one",
        ],
    },
    StackTemplate {
        name: "NextJS + Supabase",
        description: "Next.js app router on top of a hosted Postgres with auth and storage.",
        url: "https://supabase.com/docs/guides/getting-started/quickstarts/nextjs",
        tags: &["frontend", "fullstack", "nextjs", "react", "typescript", "supabase", "database", "sql", "vercel"],
        reasons: &["Managed Postgres, auth and storage with generous free tier"],
    },
    StackTemplate {
        name: "Vite + React SPA",
        description: "Single-page React application built with Vite.",
        url: "https://vitejs.dev/guide/",
        tags: &["frontend", "react", "javascript", "typescript", "static", "netlify"],
        reasons: &["Instant dev server and minimal configuration"],
    },
    StackTemplate {
        name: "SvelteKit",
        description: "Compiler-first web framework with file-based routing and SSR.",
        url: "https://kit.svelte.dev",
        tags: &["frontend", "svelte", "vercel"],
        reasons: &["Small bundles and very little boilerplate"],
    },
    StackTemplate {
        name: "Astro Static Site",
        description: "Content-focused static site generator shipping zero JavaScript by default.",
        url: "https://astro.build",
        tags: &["frontend", "static", "jamstack", "netlify"],
        reasons: &["Ideal for documentation, blogs and marketing pages"],
    },
    StackTemplate {
        name: "Shopify Hydrogen",
        description: "React-based headless commerce framework for Shopify storefronts.",
        url: "https://hydrogen.shopify.dev",
        tags: &["frontend", "react", "commerce", "payment", "typescript", "serverless"],
        reasons: &["Checkout, catalog and payments handled by Shopify"],
    },
    StackTemplate {
        name: "Express + MongoDB API",
        description: "Minimal Node.js REST API backed by MongoDB.",
        url: "https://expressjs.com",
        tags: &["backend", "nodejs", "javascript", "mongodb", "docker"],
        reasons: &["Huge middleware ecosystem", "Schemaless storage for fast iteration"],
    },
    StackTemplate {
        name: "Flask + PostgreSQL",
        description: "Lightweight Python web service with a relational database.",
        url: "https://flask.palletsprojects.com",
        tags: &["backend", "python", "sql", "self-hosted"],
        reasons: &["Small surface area that is easy to reason about"],
    },
    StackTemplate {
        name: "Django",
        description: "Batteries-included Python framework with admin, ORM and auth.",
        url: "https://www.djangoproject.com",
        tags: &["backend", "fullstack", "python", "django", "auth", "database", "sql", "self-hosted"],
        reasons: &["Admin interface generated from your models", "Mature security defaults"],
    },
    StackTemplate {
        name: "Ruby on Rails",
        description: "Convention-over-configuration full-stack framework.",
        url: "https://rubyonrails.org",
        tags: &["fullstack", "ruby", "rails", "database", "sql", "commerce", "docker"],
        reasons: &["Ship CRUD-heavy products quickly"],
    },
    StackTemplate {
        name: "Laravel",
        description: "Expressive PHP framework with queues, billing and auth scaffolding.",
        url: "https://laravel.com",
        tags: &["fullstack", "php", "laravel", "auth", "database", "sql", "payment", "self-hosted"],
        reasons: &["Cashier handles subscription billing", "First-party tooling for most needs"],
    },
    StackTemplate {
        name: "Flutter + Firebase",
        description: "Cross-platform mobile apps backed by Firebase services.",
        url: "https://firebase.google.com/docs/flutter/setup",
        tags: &["mobile", "flutter", "dart", "firebase", "database"],
        reasons: &["One codebase for iOS and Android", "Realtime database and auth out of the box"],
    },
    StackTemplate {
        name: "React Native + Expo",
        description: "Native mobile apps written in React with Expo tooling.",
        url: "https://expo.dev",
        tags: &["mobile", "reactnative", "react", "javascript", "typescript"],
        reasons: &["Reuse React knowledge for native apps"],
    },
    StackTemplate {
        name: "Go + gRPC Microservices",
        description: "Statically typed services communicating over gRPC on Kubernetes.",
        url: "https://grpc.io/docs/languages/go/",
        tags: &["backend", "go", "grpc", "kubernetes", "aws", "sql"],
        reasons: &["Predictable performance at scale"],
    },
    StackTemplate {
        name: "Phoenix LiveView",
        description: "Elixir framework for server-rendered real-time interfaces.",
        url: "https://www.phoenixframework.org",
        tags: &["fullstack", "elixir", "websocket", "database", "sql"],
        reasons: &["Real-time UI without a separate frontend build"],
    },
];

pub(super) fn standard_candidates() -> Vec<Candidate> {
    STANDARD_STACKS
        .iter()
        .map(StackTemplate::to_candidate)
        .collect()
}
