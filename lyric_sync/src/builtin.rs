//! The cue sheet for the bundled song.

pub(crate) const DEFAULT_CUES: &[(f64, &str)] = &[
    (0.38, "(Intro Music)"),
    (23.67, "Snowflakes dancing 'round"),
    (26.55, "Landing on your brow"),
    (29.44, "Streetlights fading out"),
    (31.69, "I only see you now"),
    (35.3, "Freezing up the time"),
    (38.29, "Keeping this somehow"),
    (41.18, "Touch speaks louder than"),
    (43.4, "Words can disavow"),
    (46.98, "Leave the noisy world"),
    (48.29, "Leave it all behind"),
    (49.85, "Focus on your breath"),
    (51.25, "Rhythm gentle kind"),
    (52.77, "Every little thing"),
    (54.19, "Printed on my mind"),
    (55.68, "Closer to me now"),
    (57.09, "No more time to find"),
    (59.13, "Drowning in this vibe"),
    (62.05, "On this Christmas Eve"),
    (65.05, "Looking in your eyes"),
    (68.05, "It’s all that I believe"),
    (70.85, "I don’t need no wine"),
    (73.73, "Just to feel relieved"),
    (76.69, "Perfect is the world"),
    (79.91, "When you're here with me"),
    (86.58, "(Yeah...)"),
    (88.59, "Red scarf wrapping round"),
    (90.92, "Weaving up a dream"),
    (93.87, "Footprints in the snow"),
    (96.14, "Like a destined team"),
    (99.73, "Heartbeat losing track"),
    (102.64, "Flowing like a stream"),
    (105.49, "Locked inside your gaze"),
    (107.88, "Glowing like a beam"),
    (111.31, "Leave the noisy world"),
    (112.58, "Leave it all behind"),
    (114.05, "Focus on your breath"),
    (115.49, "Rhythm gentle kind"),
    (116.95, "Every little thing"),
    (118.48, "Printed on my mind"),
    (119.89, "Closer to me now"),
    (121.43, "No more time to find"),
    (123.35, "Drowning in this vibe"),
    (126.29, "On this Christmas Eve"),
    (129.06, "Looking in your eyes"),
    (132.12, "It’s all that I believe"),
    (134.96, "I don’t need no wine"),
    (137.9, "Just to feel relieved"),
    (140.79, "Perfect is the world"),
    (144.01, "When you're here with me"),
    (146.49, "Sleigh bells ringing out"),
    (149.12, "Singing for the night"),
    (152.0, "Your love burns so hot"),
    (155.01, "Brighter than the light"),
    (157.85, "Like a cocoa cup"),
    (160.73, "Warming up the fright"),
    (163.56, "You’re the only one"),
    (166.46, "Everything is right"),
    (169.93, "(Instrumental Solo)"),
    (192.99, "Drowning in this vibe"),
    (195.7, "On this Christmas Eve"),
    (198.47, "Looking in your eyes"),
    (201.46, "It’s all that I believe"),
    (204.22, "I don’t need no wine"),
    (207.06, "Just to feel relieved"),
    (209.98, "Perfect is the world"),
    (212.9, "When you're here with me"),
    (215.4, "Snow is falling down"),
    (218.1, "Under moonlight's glow"),
    (220.91, "Heaven's right here"),
    (223.82, "I just want you to know"),
    (226.69, "Time is moving slow"),
    (229.39, "Never let you go"),
    (232.33, "Baby stay with me"),
    (235.23, "Let the sunrise slow..."),
];
