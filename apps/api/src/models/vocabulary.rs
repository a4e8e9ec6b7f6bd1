//! Fixed vocabularies accepted for enumerated request fields.

pub const INDUSTRIES: &[&str] = &[
    "Technology",
    "Finance_Banking",
    "Healthcare_Biotech",
    "Manufacturing_Automotive",
    "Retail_Consumer_Goods",
    "Energy_Utilities",
    "Media_Entertainment",
    "Telecommunications",
    "Transportation_Logistics",
    "Real_Estate_Construction",
    "Education",
    "Government_Public_Sector",
    "Non_Profit_Social_Impact",
    "Other",
];

pub const CORE_TECHNOLOGIES: &[&str] = &[
    "Artificial_Intelligence",
    "Machine_Learning",
    "Blockchain",
    "Cloud_Computing",
    "Cybersecurity",
    "Data_Science",
    "Internet_of_Things_IoT",
    "Augmented_Reality_AR",
    "Virtual_Reality_VR",
    "Mobile_Development",
    "Web_Development",
    "DevOps",
    "Software_Development",
    "Testing_Quality_Assurance",
];

pub const JOB_TYPES: &[&str] = &[
    "Full_time",
    "Part_time",
    "Contract",
    "Internship",
];

pub const EDUCATION_LEVELS: &[&str] = &[
    "High_School_Diploma",
    "Associates_Degree",
    "Bachelors_Degree",
    "Masters_Degree",
    "PhD",
    "Other",
];

pub const SKILLS: &[&str] = &[
    "JavaScript_TypeScript",
    "Python",
    "Java",
    "CSharp",
    "C_CPlusPlus",
    "Go_Golang",
    "Rust",
    "Kotlin",
    "Swift",
    "PHP",
    "Ruby",
    "Scala",
    "Dart",
    "R",
    "Elixir",
    "Perl",
    "Frontend_Development",
    "ReactJS",
    "Angular",
    "VueJS",
    "Svelte",
    "NextJS",
    "NuxtJS",
    "HTML_CSS",
    "Tailwind_CSS",
    "Bootstrap",
    "WebAssembly",
    "Backend_Development",
    "NodeJS",
    "ExpressJS",
    "Django",
    "Flask",
    "FastAPI",
    "Spring_Boot",
    "Laravel",
    "Ruby_on_Rails",
    "ASP_NET",
    "NestJS",
    "GraphQL",
    "REST_APIs",
    "React_Native",
    "Flutter",
    "Swift_iOS",
    "Kotlin_Android",
    "Xamarin",
    "Ionic",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Firebase",
    "SQLite",
    "Microsoft_SQL_Server",
    "Oracle_DB",
    "Cassandra",
    "Redis",
    "DynamoDB",
    "Neo4j_Graph_DB",
    "AWS_Amazon_Web_Services",
    "Azure",
    "Google_Cloud_GCP",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Ansible",
    "Jenkins",
    "GitHub_Actions",
    "CI_CD_Pipelines",
    "Serverless_AWS_Lambda_Azure_Functions",
    "AI_ML_Data_Science",
    "TensorFlow",
    "PyTorch",
    "Scikit_learn",
    "Keras",
    "OpenAI_GPT",
    "LangChain",
    "Hugging_Face",
    "Pandas",
    "NumPy",
    "Apache_Spark",
    "Hadoop",
    "Blockchain_Web3",
    "Solidity",
    "Ethereum",
    "Polygon",
    "Solana",
    "Hyperledger",
    "Web3JS_EthersJS",
    "Cybersecurity_General",
    "Penetration_Testing",
    "Ethical_Hacking",
    "SIEM_Tools_Splunk_Wazuh",
    "Cryptography",
    "Zero_Trust_Security",
    "Game_Development",
    "Unity",
    "Unreal_Engine",
    "Godot",
    "Phaser",
    "Others",
    "IoT_Internet_of_Things",
    "AR_VR_Augmented_Virtual_Reality",
    "Embedded_Systems",
    "Robotics",
    "Quantum_Computing",
];
