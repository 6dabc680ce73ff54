//! Fixed payloads served when no completion or video API is reachable.

use crate::models::{
    lesson::{Activity, DoubtAnswer, LessonContent, LessonSection, Video},
    quiz::{Question, QuizContent, DEFAULT_PASSING_SCORE},
};

/// Minutes.
pub const DEMO_QUIZ_TIME_LIMIT: u32 = 30;

fn strings<const N: usize>(items: [String; N]) -> Vec<String> {
    items.into_iter().collect()
}

fn section(name: &str, duration: &str, activities: [String; 4]) -> LessonSection {
    LessonSection {
        section: name.to_string(),
        duration: duration.to_string(),
        activities: strings(activities),
    }
}

pub fn lesson(topic: &str) -> LessonContent {
    LessonContent {
        learning_objectives: strings([
            format!("Understand the fundamental concepts of {topic}"),
            format!("Apply {topic} principles to real-world scenarios"),
            format!("Analyze and evaluate different aspects of {topic}"),
            format!("Create connections between {topic} and other subjects"),
            "Demonstrate mastery through practical applications".to_string(),
        ]),
        lesson_structure: vec![
            section(
                "Introduction & Warm-up",
                "10 minutes",
                [
                    "Quick review of previous lesson".to_string(),
                    format!("Introduce {topic} with an engaging question"),
                    "Share learning objectives with students".to_string(),
                    "Fun fact sharing session".to_string(),
                ],
            ),
            section(
                "Main Content Delivery",
                "25 minutes",
                [
                    format!("Explain core concepts of {topic}"),
                    "Interactive demonstrations".to_string(),
                    "Student participation activities".to_string(),
                    "Real-world examples and applications".to_string(),
                ],
            ),
            section(
                "Practice & Application",
                "15 minutes",
                [
                    "Guided practice exercises".to_string(),
                    "Group work and discussions".to_string(),
                    "Problem-solving activities".to_string(),
                    "Peer teaching moments".to_string(),
                ],
            ),
            section(
                "Wrap-up & Assessment",
                "10 minutes",
                [
                    "Summary of key points".to_string(),
                    "Quick assessment quiz".to_string(),
                    "Homework assignment".to_string(),
                    "Preview of next lesson".to_string(),
                ],
            ),
        ],
        activities: vec![
            Activity {
                name: format!("{topic} Exploration"),
                description: format!("Interactive activity to explore {topic} concepts"),
                materials: ["Whiteboard", "Markers", "Handouts", "Digital tools"]
                    .map(String::from)
                    .to_vec(),
                duration: "15 minutes".to_string(),
            },
            Activity {
                name: "Group Discussion".to_string(),
                description: format!("Collaborative discussion about {topic} applications"),
                materials: ["Discussion prompts", "Note-taking sheets"]
                    .map(String::from)
                    .to_vec(),
                duration: "10 minutes".to_string(),
            },
        ],
        homework: strings([
            format!("Complete practice exercises on {topic}"),
            format!("Research one real-world application of {topic}"),
            "Prepare questions for next class discussion".to_string(),
            "Review notes and create a summary".to_string(),
        ]),
        amazing_facts: strings([
            format!("Did you know that {topic} is used in many everyday applications?"),
            format!("Scientists have been studying {topic} for over 100 years!"),
            format!("The principles of {topic} can be found in nature everywhere"),
            format!("Modern technology heavily relies on understanding {topic}"),
            format!("{topic} connects to many other subjects like math, science, and art"),
        ]),
        jokes: strings([
            format!("Why did the student love learning about {topic}? Because it was absolutely fascinating!"),
            format!("What did the teacher say about {topic}? \"It's not just a subject, it's an adventure!\""),
            format!("How do you make {topic} more interesting? Add some fun facts and jokes!"),
        ]),
        quotes: [
            "\"Education is the most powerful weapon which you can use to change the world.\" - Nelson Mandela",
            "\"The beautiful thing about learning is that no one can take it away from you.\" - B.B. King",
            "\"Learning never exhausts the mind.\" - Leonardo da Vinci",
            "\"Education is not preparation for life; education is life itself.\" - John Dewey",
        ]
        .map(String::from)
        .to_vec(),
        notes: study_notes(topic),
    }
}

fn study_notes(topic: &str) -> String {
    format!(
        r#"# {topic} - Complete Study Notes

## Introduction
{topic} is a fascinating subject that connects to many aspects of our daily lives. Understanding these concepts will help you see the world in a new way!

## Key Concepts
- Fundamental principles of {topic}
- Real-world applications and examples
- Historical development and importance
- Modern innovations and discoveries

## Important Points to Remember
1. {topic} is everywhere around us
2. It connects to other subjects like mathematics and science
3. Understanding it helps in problem-solving
4. It has practical applications in technology

## Fun Facts
- {topic} has been studied for centuries
- Many famous scientists contributed to our understanding
- It's used in cutting-edge technology today
- You can see examples in nature and everyday life

## Study Tips
- Practice regularly with examples
- Connect concepts to real-world situations
- Ask questions when you don't understand
- Work with classmates to discuss ideas

## Remember This Quote
"{topic} is not just about memorizing facts, it's about understanding how the world works!"
"#
    )
}

fn mcq(prompt: String, options: [&str; 4], correct: &str, explanation: String) -> Question {
    Question {
        prompt,
        options: options.map(String::from).to_vec(),
        correct_option: correct.to_string(),
        explanation: Some(explanation),
    }
}

/// Ten questions; the correct option always appears among the four choices.
pub fn quiz(topic: &str, grade: &str) -> QuizContent {
    const ALL: &str = "All of the above";

    let questions = vec![
        mcq(
            format!("What is the main concept behind {topic}?"),
            [
                "A fundamental principle in science",
                "A mathematical equation",
                "A historical event",
                "A literary technique",
            ],
            "A fundamental principle in science",
            format!("{topic} is indeed a fundamental principle that helps us understand how things work."),
        ),
        mcq(
            format!("Which of the following is an example of {topic} in everyday life?"),
            ["Cooking food", "Riding a bicycle", "Reading a book", ALL],
            ALL,
            format!("{topic} can be observed in many daily activities."),
        ),
        mcq(
            format!("Who is considered a pioneer in the study of {topic}?"),
            [
                "Albert Einstein",
                "Isaac Newton",
                "Marie Curie",
                "Many scientists contributed",
            ],
            "Many scientists contributed",
            format!("The understanding of {topic} developed through the work of many brilliant minds."),
        ),
        mcq(
            format!("What makes {topic} important for {grade} students to learn?"),
            [
                "It helps in understanding the world",
                "It connects to other subjects",
                "It develops critical thinking",
                ALL,
            ],
            ALL,
            format!("Learning {topic} provides multiple benefits for students."),
        ),
        mcq(
            format!("Which field of study is most closely related to {topic}?"),
            ["Science", "Mathematics", "Technology", "All fields are connected"],
            "All fields are connected",
            format!("{topic} demonstrates how different subjects interconnect."),
        ),
        mcq(
            format!("What is the best way to remember concepts about {topic}?"),
            [
                "Memorize definitions only",
                "Practice with examples",
                "Ignore the details",
                "Study once before exam",
            ],
            "Practice with examples",
            "Active practice with real examples helps in better understanding and retention."
                .to_string(),
        ),
        mcq(
            format!("How does {topic} relate to modern technology?"),
            [
                "It has no connection",
                "It forms the foundation",
                "It is outdated",
                "It is only theoretical",
            ],
            "It forms the foundation",
            format!("Understanding {topic} is crucial for technological advancement."),
        ),
        mcq(
            format!("What should you do if you don't understand a concept in {topic}?"),
            [
                "Skip it and move on",
                "Ask questions and seek help",
                "Memorize without understanding",
                "Give up studying",
            ],
            "Ask questions and seek help",
            "Asking questions is the best way to clear doubts and deepen understanding."
                .to_string(),
        ),
        mcq(
            format!("Which of these is a good study strategy for {topic}?"),
            [
                "Study alone always",
                "Never take notes",
                "Discuss with classmates",
                "Avoid practical examples",
            ],
            "Discuss with classmates",
            "Collaborative learning helps in better understanding of complex concepts."
                .to_string(),
        ),
        mcq(
            format!("What makes learning {topic} fun and interesting?"),
            [
                "Connecting it to real life",
                "Finding patterns and relationships",
                "Discovering amazing facts",
                ALL,
            ],
            ALL,
            format!("{topic} becomes exciting when we see its connections and applications everywhere!"),
        ),
    ];

    QuizContent {
        total_questions: questions.len(),
        multiple_choice: questions,
        passing_score: DEFAULT_PASSING_SCORE,
        time_limit: DEMO_QUIZ_TIME_LIMIT,
    }
}

pub fn doubt(question: &str) -> DoubtAnswer {
    let answer = format!(
        r#"Great question! Here's a comprehensive answer to help you understand: {question}.

This is a common doubt that many students have. Let me break it down for you:

1. **Main Concept**: The key idea here is understanding the fundamental principles involved.

2. **Simple Explanation**: Think of it like this - imagine you're trying to understand how something works in everyday life.

3. **Example**: For instance, if you're asking about a science concept, try to relate it to something you see around you.

4. **Study Tip**: The best way to remember this is through practice and connecting it to real-world examples.

5. **Additional Resources**: You can also watch educational videos or discuss with your classmates to get different perspectives.

Remember, there's no such thing as a silly question - asking doubts is how we learn and grow! Keep questioning and exploring."#
    );

    DoubtAnswer {
        answer,
        related_topics: [
            "Fundamental concepts",
            "Real-world applications",
            "Study techniques",
            "Practice exercises",
        ]
        .map(String::from)
        .to_vec(),
        study_tips: [
            "Practice regularly with examples",
            "Connect concepts to daily life",
            "Discuss with peers and teachers",
            "Use visual aids and diagrams",
        ]
        .map(String::from)
        .to_vec(),
    }
}

/// Related topics and tips attached to a live doubt answer.
pub fn live_doubt_extras() -> (Vec<String>, Vec<String>) {
    (
        ["Study techniques", "Practice exercises", "Real-world applications"]
            .map(String::from)
            .to_vec(),
        [
            "Practice regularly",
            "Ask questions when in doubt",
            "Connect to real-world examples",
            "Discuss with peers",
        ]
        .map(String::from)
        .to_vec(),
    )
}

pub fn videos(topic: &str, grade: &str) -> Vec<Video> {
    let video = |id: &str, title: String, description: String, photo: u32, channel: &str, duration: &str| Video {
        id: id.to_string(),
        title,
        description,
        thumbnail: format!(
            "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=400"
        ),
        url: format!("https://www.youtube.com/embed/{id}"),
        channel_title: channel.to_string(),
        duration: Some(duration.to_string()),
    };

    vec![
        video(
            "dQw4w9WgXcQ",
            format!("{topic} Explained for {grade} Students"),
            format!("Learn about {topic} in this engaging educational video designed for {grade} level students."),
            1181671,
            "EduChannel",
            "10:30",
        ),
        video(
            "ScMzIvxBSi4",
            format!("{topic} - Fun Learning Video"),
            format!("Discover the amazing world of {topic} with fun animations and clear explanations."),
            1181677,
            "Learning Made Easy",
            "8:45",
        ),
        video(
            "oHg5SJYRHA0",
            format!("{topic} Experiments and Examples"),
            format!("See {topic} in action with real experiments and practical examples."),
            1181681,
            "Science Explorer",
            "12:15",
        ),
    ]
}
