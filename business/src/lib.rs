pub mod application {
    pub mod plan {
        pub mod vectorize;
    }
    pub mod recommendation {
        pub mod search;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod plan {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod services;
        pub mod use_cases {
            pub mod vectorize;
        }
    }
    pub mod recommendation {
        pub mod assembler;
        pub mod eligibility;
        pub mod errors;
        pub mod model;
        pub mod prompt;
        pub mod services;
        pub mod use_cases {
            pub mod search;
        }
    }
}
