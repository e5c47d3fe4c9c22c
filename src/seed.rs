//! Sample catalog used to populate an empty database
//!
//! The server seeds on startup when the table is empty; the `seed` command
//! clears the table and inserts [`seed_tutorials`] unconditionally.

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::database::TutorialStore;
use crate::error::StoreError;
use crate::model::{Difficulty, Tutorial};

struct SeedEntry {
    title: &'static str,
    description: &'static str,
    author: &'static str,
    category: &'static str,
    published: bool,
    /// Days before now for `created_at` / `updated_at`
    created_days_ago: i64,
    updated_days_ago: i64,
    read_time: i32,
    difficulty: Difficulty,
    tags: &'static str,
}

const CATALOG: [SeedEntry; 16] = [
    SeedEntry {
        title: "Getting Started with React 18",
        description: "Learn the fundamentals of React 18, including new features like Concurrent Rendering, Automatic Batching, and Transitions. This beginner-friendly tutorial takes you through setting up your first React application and building a simple component-based UI with hooks and state management.",
        author: "Sarah Johnson",
        category: "Frontend Development",
        published: true,
        created_days_ago: 120,
        updated_days_ago: 110,
        read_time: 15,
        difficulty: Difficulty::Beginner,
        tags: "react,javascript,frontend,hooks",
    },
    SeedEntry {
        title: "Building Responsive Layouts with CSS Grid",
        description: "Master CSS Grid layout to create modern, responsive web designs that adapt to any screen size. This tutorial covers grid templates, areas, gaps, and how to combine Grid with Flexbox for powerful layouts. Includes practical examples and common layout patterns you can use in your projects.",
        author: "Alex Chen",
        category: "Frontend Development",
        published: true,
        created_days_ago: 100,
        updated_days_ago: 95,
        read_time: 12,
        difficulty: Difficulty::Intermediate,
        tags: "css,layout,responsive,design",
    },
    SeedEntry {
        title: "Introduction to TypeScript for JavaScript Developers",
        description: "Transform your JavaScript skills into TypeScript proficiency. Learn how static typing can prevent bugs, improve IDE support, and make your code more maintainable. This tutorial walks through converting a JavaScript project to TypeScript, explaining interfaces, types, generics, and best practices.",
        author: "Michael Rodriguez",
        category: "Programming Languages",
        published: true,
        created_days_ago: 90,
        updated_days_ago: 85,
        read_time: 20,
        difficulty: Difficulty::Intermediate,
        tags: "typescript,javascript,web development",
    },
    SeedEntry {
        title: "React Native: Build Your First Mobile App",
        description: "Learn to build cross-platform mobile apps with React Native. This comprehensive guide covers setting up your development environment, creating your first app, implementing navigation, and deploying to app stores. Perfect for React developers looking to expand into mobile development.",
        author: "Jessica Williams",
        category: "Mobile Development",
        published: true,
        created_days_ago: 80,
        updated_days_ago: 75,
        read_time: 25,
        difficulty: Difficulty::Intermediate,
        tags: "react-native,mobile,ios,android",
    },
    SeedEntry {
        title: "Advanced State Management with Redux Toolkit",
        description: "Take your Redux skills to the next level with Redux Toolkit. Learn how RTK simplifies store setup, reduces boilerplate, and improves developer experience. This tutorial covers slices, thunks, selectors, and integration with React for efficient global state management.",
        author: "David Kim",
        category: "Frontend Development",
        published: true,
        created_days_ago: 70,
        updated_days_ago: 65,
        read_time: 18,
        difficulty: Difficulty::Advanced,
        tags: "redux,react,state-management,javascript",
    },
    SeedEntry {
        title: "Building RESTful APIs with Node.js and Express",
        description: "Learn to create robust, scalable REST APIs using Node.js and Express. This tutorial covers route handling, middleware, authentication, error handling, and database integration. By the end, you'll have built a fully functional API ready for production use.",
        author: "Emily Clark",
        category: "Backend Development",
        published: true,
        created_days_ago: 60,
        updated_days_ago: 55,
        read_time: 22,
        difficulty: Difficulty::Intermediate,
        tags: "node.js,express,api,backend",
    },
    SeedEntry {
        title: "Getting Started with Docker for Web Developers",
        description: "Simplify your development workflow with Docker. Learn how to containerize your web applications, set up development environments, and manage multi-container applications with Docker Compose. This practical guide is perfect for developers looking to standardize their development and deployment processes.",
        author: "Robert Martinez",
        category: "DevOps",
        published: true,
        created_days_ago: 50,
        updated_days_ago: 45,
        read_time: 15,
        difficulty: Difficulty::Beginner,
        tags: "docker,devops,containers,deployment",
    },
    SeedEntry {
        title: "Python Data Analysis with Pandas",
        description: "Master data manipulation and analysis in Python using the powerful Pandas library. This tutorial guides you through importing, cleaning, transforming, and visualizing data with practical examples. Perfect for aspiring data scientists and analysts looking to enhance their data processing skills.",
        author: "Sophie Anderson",
        category: "Data Science",
        published: true,
        created_days_ago: 40,
        updated_days_ago: 35,
        read_time: 20,
        difficulty: Difficulty::Intermediate,
        tags: "python,pandas,data-analysis,data-science",
    },
    SeedEntry {
        title: "Introduction to Machine Learning with scikit-learn",
        description: "Begin your journey into machine learning with Python's scikit-learn library. This beginner-friendly tutorial covers fundamental ML concepts, preparing datasets, choosing algorithms, training models, and evaluating performance. No advanced math required—just practical, hands-on examples to get you started.",
        author: "Daniel Wilson",
        category: "Data Science",
        published: true,
        created_days_ago: 30,
        updated_days_ago: 25,
        read_time: 30,
        difficulty: Difficulty::Intermediate,
        tags: "machine-learning,python,scikit-learn,ai",
    },
    SeedEntry {
        title: "Modern CSS Techniques Every Developer Should Know",
        description: "Level up your CSS skills with modern techniques like custom properties, logical properties, container queries, and the new color functions. This tutorial shows how to use these features to create more maintainable, flexible stylesheets that work across browsers.",
        author: "Lisa Brown",
        category: "Frontend Development",
        published: true,
        created_days_ago: 20,
        updated_days_ago: 15,
        read_time: 15,
        difficulty: Difficulty::Intermediate,
        tags: "css,web-design,frontend",
    },
    SeedEntry {
        title: "Building a Full-Stack JavaScript Application with MERN",
        description: "Create a complete web application using the MERN stack (MongoDB, Express, React, Node.js). This comprehensive tutorial takes you through building both frontend and backend, implementing authentication, state management, and database operations to create a fully functional app.",
        author: "Chris Taylor",
        category: "Full Stack Development",
        published: true,
        created_days_ago: 15,
        updated_days_ago: 10,
        read_time: 35,
        difficulty: Difficulty::Advanced,
        tags: "mern,javascript,full-stack,mongodb",
    },
    SeedEntry {
        title: "Flutter vs React Native: Choosing the Right Mobile Framework",
        description: "Comparing Flutter and React Native to help you choose the best framework for your mobile app project. This detailed comparison covers performance, development experience, community support, and use cases to guide your decision.",
        author: "Natalie Cooper",
        category: "Mobile Development",
        published: false,
        created_days_ago: 12,
        updated_days_ago: 12,
        read_time: 18,
        difficulty: Difficulty::Intermediate,
        tags: "flutter,react-native,mobile-development,comparison",
    },
    SeedEntry {
        title: "Introduction to AWS for Developers",
        description: "Navigate the AWS ecosystem as a developer with this beginner-friendly guide. Learn about core services like EC2, S3, Lambda, and DynamoDB, and how to use them to deploy scalable applications. Includes practical examples and best practices for cloud architecture.",
        author: "James Miller",
        category: "Cloud Computing",
        published: false,
        created_days_ago: 8,
        updated_days_ago: 8,
        read_time: 25,
        difficulty: Difficulty::Beginner,
        tags: "aws,cloud,devops,serverless",
    },
    SeedEntry {
        title: "Effective Communication Skills for Tech Professionals",
        description: "Enhance your communication skills to advance your tech career. This guide covers technical documentation, presenting complex ideas, active listening, and collaborating effectively with non-technical stakeholders. Perfect for developers looking to improve their soft skills.",
        author: "Rachel Lee",
        category: "Career Development",
        published: false,
        created_days_ago: 5,
        updated_days_ago: 5,
        read_time: 12,
        difficulty: Difficulty::Beginner,
        tags: "soft-skills,communication,career,professional-development",
    },
    SeedEntry {
        title: "Mastering Git and GitHub Workflows",
        description: "Level up your version control skills with advanced Git techniques and GitHub collaboration workflows. Learn branching strategies, rebasing, cherry-picking, and how to manage complex projects with multiple contributors. Ideal for developers working in team environments.",
        author: "Thomas Garcia",
        category: "Development Tools",
        published: false,
        created_days_ago: 3,
        updated_days_ago: 3,
        read_time: 20,
        difficulty: Difficulty::Advanced,
        tags: "git,github,version-control,collaboration",
    },
    SeedEntry {
        title: "UI/UX Design Principles for Developers",
        description: "Learn essential design principles that every developer should know. This tutorial covers user-centered design, visual hierarchy, color theory, typography, and accessibility. By understanding these concepts, you can create more intuitive, visually appealing interfaces even without a design background.",
        author: "Olivia White",
        category: "Design",
        published: false,
        created_days_ago: 1,
        updated_days_ago: 1,
        read_time: 15,
        difficulty: Difficulty::Beginner,
        tags: "ui,ux,design,frontend",
    },
];

/// Builds the sample tutorials with fresh ids and random starting counters
pub fn seed_tutorials() -> Vec<Tutorial> {
    let now = Utc::now();
    let mut rng = rand::rng();

    CATALOG
        .iter()
        .enumerate()
        .map(|(index, entry)| Tutorial {
            id: Uuid::new_v4(),
            title: entry.title.to_string(),
            description: Some(entry.description.to_string()),
            author: Some(entry.author.to_string()),
            category: Some(entry.category.to_string()),
            published: entry.published,
            read_time: Some(entry.read_time),
            difficulty: Some(entry.difficulty),
            tags: Some(entry.tags.to_string()),
            image_url: Some(format!("https://picsum.photos/id/{index}/600/400")),
            view_count: rng.random_range(0..1000),
            likes: rng.random_range(0..100),
            created_at: now - Duration::days(entry.created_days_ago),
            updated_at: now - Duration::days(entry.updated_days_ago),
        })
        .collect()
}

/// Inserts the sample catalog only when the table is empty
///
/// Returns the number of tutorials inserted.
pub fn seed_if_empty(store: &TutorialStore) -> Result<usize, StoreError> {
    if store.count()? > 0 {
        return Ok(0);
    }
    store.insert_many(&seed_tutorials())
}
