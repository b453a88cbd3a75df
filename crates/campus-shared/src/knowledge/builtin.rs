//! Built-in knowledge entries.
//!
//! Keys must stay long enough that they are not accidental substrings of
//! unrelated questions ("ai" is inside "explain").

pub const ENTRIES: &[(&str, &str)] = &[
    (
        "albert einstein",
        "Albert Einstein (1879-1955) was a theoretical physicist best known for the theory of relativity and the equation E = mc². He received the 1921 Nobel Prize in Physics for explaining the photoelectric effect.",
    ),
    (
        "isaac newton",
        "Sir Isaac Newton (1643-1727) was an English mathematician and physicist. He formulated the laws of motion and universal gravitation and co-developed calculus.",
    ),
    (
        "newton's laws",
        "Newton's three laws of motion: an object stays at rest or in uniform motion unless acted on by a force; force equals mass times acceleration (F = ma); every action has an equal and opposite reaction.",
    ),
    (
        "marie curie",
        "Marie Curie (1867-1934) was a physicist and chemist who pioneered research on radioactivity. She was the first person to win Nobel Prizes in two different sciences, physics and chemistry.",
    ),
    (
        "william shakespeare",
        "William Shakespeare (1564-1616) was an English playwright and poet, author of works such as Hamlet, Macbeth and Romeo and Juliet.",
    ),
    (
        "ada lovelace",
        "Ada Lovelace (1815-1852) was an English mathematician who wrote what is considered the first published algorithm intended for Charles Babbage's Analytical Engine.",
    ),
    (
        "photosynthesis",
        "Photosynthesis is the process plants, algae and some bacteria use to turn light energy, water and carbon dioxide into glucose and oxygen.",
    ),
    (
        "gravity",
        "Gravity is the force by which masses attract one another. Near Earth's surface it accelerates objects at about 9.8 m/s².",
    ),
    (
        "black hole",
        "A black hole is a region of spacetime where gravity is so strong that nothing, not even light, can escape once it crosses the event horizon.",
    ),
    (
        "dna",
        "DNA (deoxyribonucleic acid) is the molecule that carries genetic instructions in living organisms, arranged as a double helix of paired bases.",
    ),
    (
        "theory of evolution",
        "The theory of evolution by natural selection, proposed by Charles Darwin and Alfred Russel Wallace, explains how populations change over generations as heritable traits that aid survival become more common.",
    ),
    (
        "mitochondria",
        "Mitochondria are organelles that produce most of a cell's chemical energy in the form of ATP. They are often called the powerhouse of the cell.",
    ),
    (
        "pythagorean theorem",
        "The Pythagorean theorem states that in a right triangle the square of the hypotenuse equals the sum of the squares of the other two sides: a² + b² = c².",
    ),
    (
        "french revolution",
        "The French Revolution (1789-1799) overthrew the French monarchy, established a republic and spread ideas of liberty, equality and citizenship across Europe.",
    ),
    (
        "world war ii",
        "World War II (1939-1945) was a global conflict between the Allies and the Axis powers. It was the deadliest war in history.",
    ),
    (
        "roman empire",
        "The Roman Empire was the post-Republican period of ancient Rome, traditionally dated from 27 BC. The Western Empire fell in 476 AD, while the Eastern (Byzantine) Empire lasted until 1453.",
    ),
    (
        "moon landing",
        "The first crewed Moon landing was Apollo 11 on July 20, 1969, when Neil Armstrong and Buzz Aldrin walked on the lunar surface.",
    ),
    (
        "internet",
        "The Internet is a global network of interconnected computers that communicate using the TCP/IP protocol suite. It grew out of ARPANET research in the late 1960s.",
    ),
    (
        "artificial intelligence",
        "Artificial intelligence is the field of computer science focused on building systems that perform tasks that normally need human intelligence, such as understanding language or recognizing images.",
    ),
    (
        "machine learning",
        "Machine learning is a branch of artificial intelligence in which systems learn patterns from data instead of following explicitly programmed rules.",
    ),
    (
        "algorithm",
        "An algorithm is a finite, well-defined sequence of steps for solving a problem or performing a computation.",
    ),
    (
        "democracy",
        "Democracy is a system of government in which power rests with the people, who rule directly or through freely elected representatives.",
    ),
];
