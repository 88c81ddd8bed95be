//! Compiled-in question set used when no defaults document exists yet.

use super::QaBook;

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "what is your name?",
        &[
            "I'm TerminalTalk, your terminal assistant!",
            "You can call me TerminalTalk.",
            "I'm TerminalTalk, here to help you in the terminal.",
        ],
    ),
    (
        "what is a variable?",
        &[
            "A variable is a named location in memory used to store data for your program.",
            "A variable stores a value in memory so your program can use it later.",
        ],
    ),
    (
        "what is a function?",
        &[
            "A function is a block of reusable code that performs a specific task.",
            "A function groups code so you can reuse it by calling its name.",
        ],
    ),
    (
        "what is oop?",
        &[
            "OOP stands for Object-Oriented Programming — a way to structure code using classes and objects.",
            "OOP (Object-Oriented Programming) organizes code around objects and classes.",
        ],
    ),
    (
        "what is git?",
        &[
            "Git is a version control system used to track changes in your code.",
            "Git helps you track, manage, and collaborate on changes in your codebase.",
        ],
    ),
    (
        "what is api?",
        &[
            "API stands for Application Programming Interface — a way for programs to communicate with each other.",
            "An API lets different software components talk to each other using defined rules.",
        ],
    ),
    (
        "what is debugging?",
        &[
            "Debugging is the process of finding and fixing errors in your code.",
            "Debugging means locating and fixing bugs in your program.",
        ],
    ),
    (
        "what is machine learning?",
        &[
            "Machine learning is a type of AI that allows systems to learn from data and improve over time.",
            "Machine learning lets computers learn patterns from data instead of being explicitly programmed.",
        ],
    ),
    (
        "what is json?",
        &[
            "JSON stands for JavaScript Object Notation — a lightweight format for storing and transferring data.",
            "JSON is a text format for representing structured data, often used in APIs.",
        ],
    ),
    (
        "what is a loop?",
        &[
            "A loop is a control structure that repeats a block of code multiple times.",
            "A loop runs the same code again and again until a condition is met.",
        ],
    ),
    (
        "what is recursion?",
        &[
            "Recursion is when a function calls itself to solve smaller instances of a problem.",
            "Recursion means solving a problem by breaking it into smaller subproblems and calling the same function.",
        ],
    ),
    (
        "what is the deadline for paying the semester fee?",
        &[
            "The deadline for paying the semester fee is usually a few weeks before the semester starts. Please check your student portal for the exact deadline.",
            "You must pay the semester fee before the re-registration deadline. The exact date is shown in your enrollment portal.",
        ],
    ),
    (
        "how can i register for semester 2?",
        &[
            "You can register for semester 2 through the university's online student portal under the re-registration section.",
            "To register for semester 2, log in to your student account and follow the re-registration instructions provided there.",
            "Registration is done through the student portal using your university login.",
        ],
    ),
    (
        "where can i find the exam schedule?",
        &[
            "You can find the exam schedule on the university website or in your student portal, typically under 'Examination dates'.",
        ],
    ),
    (
        "where can i find lecture hall 203?",
        &[
            "Lecture hall 203 is located in the main campus building. Please follow the campus signage or check the campus map near the entrance.",
            "You can find lecture hall 203 by looking at the campus map or using the room search on the university website.",
        ],
    ),
    (
        "how can i get to building a?",
        &[
            "Building A is near the main entrance of the campus. Follow the signs or check the campus map for the walking route.",
            "To get to Building A, enter the campus from the main gate and follow the signs labelled 'Building A'.",
        ],
    ),
    (
        "where can i find the library?",
        &[
            "The library is usually located in the central campus area. Check the campus map or follow the signs to 'Library'.",
            "You can find the library by following the direction signs on campus or by checking the building list on the university website.",
        ],
    ),
    (
        "what are the library opening hours?",
        &[
            "Library opening hours vary by semester. Please check the library section on the university website for the current schedule.",
            "The library posts its opening hours online and at the entrance. Make sure to check there for the latest information.",
        ],
    ),
    (
        "where can i find the cafeteria?",
        &[
            "The cafeteria is typically located near the main building or student center. Follow the signs to 'Mensa' or 'Cafeteria'.",
            "You can find the cafeteria by checking the campus map or asking at the information desk at the main entrance.",
        ],
    ),
    (
        "where can i get my student id card?",
        &[
            "You can collect your student ID card from the admissions office.",
            "You can pick up your student ID card at the university’s enrollment or student services desk.",
            "Student ID cards are issued by the admissions department—just bring a valid photo ID.",
        ],
    ),
    (
        "when does the semester start?",
        &[
            "The semester usually starts at the beginning of October. Please check the academic calendar for exact dates.",
            "You can find the official semester start date in your university’s academic schedule.",
        ],
    ),
    (
        "when does the semester end?",
        &[
            "The semester typically ends in February or July depending on the term.",
            "Please check the university academic calendar for the exact end date.",
        ],
    ),
    (
        "how can i register for courses?",
        &[
            "You can register for courses through the online student portal.",
            "Course registration is done in the student portal under 'Course Management'.",
        ],
    ),
    (
        "how do i access the student portal?",
        &[
            "You can access the student portal via the university website using your login credentials.",
            "Go to the university homepage and click on 'Student Portal' to log in.",
        ],
    ),
    (
        "where can i get my timetable?",
        &[
            "You can download your timetable from the student portal.",
            "Timetables are available under 'My Courses' in the student portal.",
        ],
    ),
    (
        "how can i reset my university password?",
        &[
            "You can reset your password using the 'Forgot Password' option on the login page.",
            "Contact the IT Helpdesk if you are unable to reset your password online.",
        ],
    ),
    (
        "where is the examination office?",
        &[
            "The examination office is located in Building B, first floor.",
            "You can find the exam office in Building B. Follow the signs at the entrance.",
        ],
    ),
    (
        "how can i contact the examination office?",
        &[
            "You can reach the examination office via email or through your student portal.",
            "Visit the exam office webpage for contact details and opening hours.",
        ],
    ),
    (
        "where can i see my exam results?",
        &[
            "Exam results are published in the student portal under 'Exams'.",
            "You can check your exam results online by logging into your student account.",
        ],
    ),
    (
        "how do i register for exams?",
        &[
            "You can register for exams through the student portal under 'Exams'.",
            "Exam registration is done online. Check the deadlines in your portal.",
        ],
    ),
];

/// The built-in campus and programming questions, in their original order.
pub fn builtin_book() -> QaBook {
    QaBook::from_pairs(
        BUILTIN
            .iter()
            .map(|(question, answers)| (*question, answers.to_vec())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_book_is_normalized_and_non_empty() {
        let book = builtin_book();
        assert_eq!(book.len(), BUILTIN.len());
        for entry in book.iter() {
            assert_eq!(entry.question, entry.question.trim().to_lowercase());
            assert!(!entry.answers.is_empty());
        }
        assert_eq!(book.questions().next(), Some("what is your name?"));
    }
}
