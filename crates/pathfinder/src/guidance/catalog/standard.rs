use std::collections::BTreeMap;

use super::curriculum::{Curriculum, CurriculumLevel, ResourceLink};
use super::{CareerCatalog, CareerLabel, CareerPools};

struct TrackOutline {
    label: &'static str,
    topics: [&'static str; 3],
    projects: [&'static str; 3],
}

const CSE_TRACKS: [TrackOutline; 10] = [
    TrackOutline {
        label: "Software Developer",
        topics: ["Programming in Python", "Data Structures and Algorithms", "Software Design and Testing"],
        projects: ["Command-line expense tracker", "Library management system", "Tested REST service with CI"],
    },
    TrackOutline {
        label: "Full Stack Developer",
        topics: ["HTML CSS and JavaScript", "React and Node.js", "Databases and Deployment"],
        projects: ["Personal portfolio site", "Task board with a REST backend", "Deployed e-commerce storefront"],
    },
    TrackOutline {
        label: "Backend Engineer",
        topics: ["Networking and HTTP", "API Design with Databases", "Distributed Systems"],
        projects: ["URL shortener", "Authenticated REST API", "Message queue backed order service"],
    },
    TrackOutline {
        label: "Cloud Solutions Architect",
        topics: ["Linux and Networking", "AWS Core Services", "Cloud Architecture Patterns"],
        projects: ["Static site on object storage", "Autoscaled web tier", "Multi-region reference architecture"],
    },
    TrackOutline {
        label: "DevOps Engineer",
        topics: ["Linux and Shell Scripting", "Docker and CI/CD", "Kubernetes and Observability"],
        projects: ["Automated backup scripts", "CI pipeline for a web app", "Monitored Kubernetes deployment"],
    },
    TrackOutline {
        label: "Mobile App Developer",
        topics: ["Kotlin or Swift Basics", "Android and iOS App Development", "Flutter and App Publishing"],
        projects: ["Unit converter app", "Notes app with local storage", "Published cross-platform app"],
    },
    TrackOutline {
        label: "Product Manager",
        topics: ["Product Thinking", "User Research and Analytics", "Roadmaps and Go-to-Market"],
        projects: ["Teardown of a popular app", "Feature spec with user interviews", "Launch plan with success metrics"],
    },
    TrackOutline {
        label: "Cybersecurity Analyst",
        topics: ["Networking and Security Basics", "Ethical Hacking", "Security Operations and Incident Response"],
        projects: ["Home lab network scan", "Capture-the-flag write-ups", "SIEM alerting playbook"],
    },
    TrackOutline {
        label: "Embedded Systems Engineer",
        topics: ["C Programming", "Microcontrollers and Arduino", "Real-Time Operating Systems"],
        projects: ["LED pattern controller", "Sensor data logger", "RTOS-based weather station"],
    },
    TrackOutline {
        label: "Game Developer",
        topics: ["C# Programming", "Unity Game Development", "Game Physics and Optimization"],
        projects: ["2D platformer prototype", "3D level with scripted enemies", "Polished game jam entry"],
    },
];

const CS_TRACKS: [TrackOutline; 10] = [
    TrackOutline {
        label: "Software Engineer",
        topics: ["Programming in Java", "Algorithms and System Design", "Large Scale Software Engineering"],
        projects: ["Bank account simulator", "Chat server", "Open-source contribution"],
    },
    TrackOutline {
        label: "Computer Research Scientist",
        topics: ["Discrete Mathematics", "Theory of Computation", "Research Methods in Computer Science"],
        projects: ["Algorithm complexity report", "Reproduction of a published paper", "Workshop paper draft"],
    },
    TrackOutline {
        label: "Systems Analyst",
        topics: ["Business Process Modeling", "SQL and Requirements Engineering", "Enterprise Systems Integration"],
        projects: ["Process map for a campus service", "Requirements document with ER model", "ERP integration proposal"],
    },
    TrackOutline {
        label: "Web Developer",
        topics: ["HTML and CSS", "JavaScript and the DOM", "Web Performance and Accessibility"],
        projects: ["Responsive landing page", "Interactive quiz app", "Accessible, audited website"],
    },
    TrackOutline {
        label: "Database Administrator",
        topics: ["SQL Fundamentals", "PostgreSQL Administration", "Replication and Performance Tuning"],
        projects: ["Normalized school database", "Backup and restore runbook", "Replicated cluster with tuning report"],
    },
    TrackOutline {
        label: "Network Engineer",
        topics: ["Computer Networks", "Routing and Switching", "Network Security and Automation"],
        projects: ["Packet capture analysis", "Simulated campus network", "Automated network configuration"],
    },
    TrackOutline {
        label: "Technical Product Manager",
        topics: ["Software Development Lifecycle", "Agile Product Management", "Platform Strategy"],
        projects: ["Backlog for an open-source tool", "Sprint plan and retrospective", "API platform roadmap"],
    },
    TrackOutline {
        label: "Solutions Architect",
        topics: ["Software Architecture Basics", "Cloud and Integration Patterns", "Enterprise Architecture"],
        projects: ["Architecture diagram of a known app", "Integration design for two systems", "Architecture decision records"],
    },
    TrackOutline {
        label: "QA Automation Engineer",
        topics: ["Software Testing Fundamentals", "Selenium Test Automation", "Performance Testing"],
        projects: ["Manual test plan", "Automated UI regression suite", "Load test report"],
    },
    TrackOutline {
        label: "IT Consultant",
        topics: ["IT Fundamentals", "Business Analysis", "IT Strategy and Governance"],
        projects: ["IT inventory audit", "Digitization proposal for a small business", "IT governance framework"],
    },
];

const DS_TRACKS: [TrackOutline; 10] = [
    TrackOutline {
        label: "Data Analyst",
        topics: ["Excel and Statistics", "SQL and Python for Data Analysis", "Data Visualization with Tableau"],
        projects: ["Sales spreadsheet analysis", "Exploratory analysis of public data", "Interactive KPI dashboard"],
    },
    TrackOutline {
        label: "Data Scientist",
        topics: ["Python and Statistics", "Machine Learning", "Deep Learning and Model Deployment"],
        projects: ["Exploratory data analysis notebook", "Churn prediction model", "Deployed prediction API"],
    },
    TrackOutline {
        label: "Data Engineer",
        topics: ["SQL and Data Modeling", "ETL Pipelines with Python", "Apache Spark and Data Warehousing"],
        projects: ["Star schema design", "Scheduled ETL pipeline", "Spark batch processing job"],
    },
    TrackOutline {
        label: "Business Intelligence Analyst",
        topics: ["Business Statistics", "Power BI", "Data Warehousing for BI"],
        projects: ["Market survey summary", "Power BI sales report", "Executive BI dashboard"],
    },
    TrackOutline {
        label: "Big Data Engineer",
        topics: ["Linux and Java", "Hadoop Ecosystem", "Streaming with Kafka and Spark"],
        projects: ["Log parsing utility", "HDFS word count at scale", "Real-time clickstream pipeline"],
    },
    TrackOutline {
        label: "Quantitative Analyst",
        topics: ["Probability and Statistics", "Financial Mathematics", "Algorithmic Trading"],
        projects: ["Portfolio return analysis", "Option pricing model", "Backtested trading strategy"],
    },
    TrackOutline {
        label: "Data Product Manager",
        topics: ["Data Literacy", "Experimentation and A/B Testing", "Data Product Strategy"],
        projects: ["Metrics tree for an app", "A/B test analysis", "Data product roadmap"],
    },
    TrackOutline {
        label: "Analytics Architect",
        topics: ["Data Modeling", "Modern Data Stack", "Analytics Platform Architecture"],
        projects: ["Conceptual data model", "dbt project on a sample warehouse", "Analytics platform blueprint"],
    },
    TrackOutline {
        label: "Statistician",
        topics: ["Descriptive Statistics", "Statistical Inference with R", "Bayesian Statistics"],
        projects: ["Survey data summary", "Hypothesis testing report", "Bayesian model case study"],
    },
    TrackOutline {
        label: "Data Research Scientist",
        topics: ["Linear Algebra and Probability", "Statistical Learning", "Research in Data Science"],
        projects: ["Matrix factorization from scratch", "Benchmark of learning algorithms", "Research poster"],
    },
];

const AI_ML_TRACKS: [TrackOutline; 10] = [
    TrackOutline {
        label: "AI Research Scientist",
        topics: ["Mathematics for Machine Learning", "Deep Learning", "Research in Artificial Intelligence"],
        projects: ["Gradient descent from scratch", "Neural network paper reproduction", "Original research experiment"],
    },
    TrackOutline {
        label: "Machine Learning Engineer",
        topics: ["Python for Machine Learning", "Machine Learning Algorithms", "ML Systems in Production"],
        projects: ["House price regression", "Image classifier", "Served model with monitoring"],
    },
    TrackOutline {
        label: "Computer Vision Engineer",
        topics: ["Image Processing with OpenCV", "Convolutional Neural Networks", "Object Detection and Tracking"],
        projects: ["Photo filter tool", "Handwritten digit recognizer", "Real-time object detector"],
    },
    TrackOutline {
        label: "NLP Engineer",
        topics: ["Text Processing with Python", "Natural Language Processing", "Transformers and Large Language Models"],
        projects: ["Word frequency analyzer", "Sentiment classifier", "Fine-tuned question answering model"],
    },
    TrackOutline {
        label: "Deep Learning Specialist",
        topics: ["Neural Network Fundamentals", "PyTorch", "Generative Models"],
        projects: ["Perceptron from scratch", "PyTorch image model", "GAN or diffusion demo"],
    },
    TrackOutline {
        label: "AI Product Manager",
        topics: ["AI for Everyone", "AI Product Management", "Responsible AI Deployment"],
        projects: ["AI use-case canvas", "Spec for an AI-assisted feature", "Launch review with risk assessment"],
    },
    TrackOutline {
        label: "MLOps Engineer",
        topics: ["Docker for Machine Learning", "ML Pipelines and Experiment Tracking", "Model Serving and Monitoring"],
        projects: ["Containerized notebook", "Reproducible training pipeline", "Drift-monitored model service"],
    },
    TrackOutline {
        label: "Robotics Engineer",
        topics: ["Robotics Fundamentals", "ROS Robot Operating System", "Motion Planning and Control"],
        projects: ["Line following robot simulation", "ROS navigation demo", "Path planning on a mobile robot"],
    },
    TrackOutline {
        label: "AI Ethics Consultant",
        topics: ["Ethics of Technology", "Fairness in Machine Learning", "AI Governance and Policy"],
        projects: ["Ethics case study", "Bias audit of a public model", "AI governance policy draft"],
    },
    TrackOutline {
        label: "AI Solutions Architect",
        topics: ["Cloud Computing Basics", "Machine Learning on the Cloud", "Enterprise AI Architecture"],
        projects: ["Cloud-hosted notebook", "Managed ML service prototype", "Reference architecture for an AI assistant"],
    },
];

const STAGES: [(&str, &str); 3] = [
    ("Foundations", "4-6 weeks"),
    ("Core Skills", "6-8 weeks"),
    ("Professional Practice", "8-12 weeks"),
];

pub(super) fn catalog() -> CareerCatalog {
    let pool = |tracks: &[TrackOutline]| {
        tracks
            .iter()
            .map(|track| CareerLabel::from(track.label))
            .collect::<Vec<_>>()
    };

    let pools = CareerPools {
        cse: pool(&CSE_TRACKS),
        cs: pool(&CS_TRACKS),
        ds: pool(&DS_TRACKS),
        ai_ml: pool(&AI_ML_TRACKS),
        fallback: CareerLabel::from("Software Developer"),
    };

    let curricula = CSE_TRACKS
        .iter()
        .chain(CS_TRACKS.iter())
        .chain(DS_TRACKS.iter())
        .chain(AI_ML_TRACKS.iter())
        .map(|track| (CareerLabel::from(track.label), curriculum(track)))
        .collect::<BTreeMap<_, _>>();

    CareerCatalog { pools, curricula }
}

fn curriculum(track: &TrackOutline) -> Curriculum {
    let levels = STAGES
        .iter()
        .zip(track.topics.iter().zip(track.projects.iter()))
        .enumerate()
        .map(|(index, ((stage, duration), (topic, project)))| CurriculumLevel {
            title: format!("{stage}: {topic}"),
            duration: duration.to_string(),
            courses: vec![
                ResourceLink {
                    name: format!("{topic} (Coursera)"),
                    url: format!("https://www.coursera.org/search?query={}", query(topic)),
                },
                ResourceLink {
                    name: format!("{topic} (NPTEL)"),
                    url: format!("https://nptel.ac.in/courses?searchText={}", query(topic)),
                },
            ],
            projects: vec![project.to_string()],
            internships: vec![ResourceLink {
                name: format!("{} internships on Internshala", track.label),
                url: format!(
                    "https://internshala.com/internships/keywords-{}",
                    query(track.label)
                ),
            }],
            jobs: if index == 0 {
                Vec::new()
            } else {
                vec![ResourceLink {
                    name: format!("{} openings on LinkedIn", track.label),
                    url: format!(
                        "https://www.linkedin.com/jobs/search/?keywords={}",
                        query(track.label)
                    ),
                }]
            },
            higher_studies: higher_studies(index, track.label, topic),
        })
        .collect();

    Curriculum { levels }
}

fn higher_studies(index: usize, label: &str, topic: &str) -> Vec<String> {
    match index {
        0 => vec!["Build a strong base in mathematics and programming before specialising.".to_string()],
        1 => vec![format!(
            "Short certifications in {topic} strengthen applications for {label} roles."
        )],
        _ => vec![
            format!("Consider an M.Tech or MS with a focus on {topic}."),
            "Prepare for GATE (India) or GRE (abroad) well ahead of application deadlines."
                .to_string(),
        ],
    }
}

fn query(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' => {
                encoded.push(byte as char)
            }
            b' ' => encoded.push('+'),
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}
