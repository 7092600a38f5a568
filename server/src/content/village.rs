//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! The built-in village world

use wayfarer_common::{CharacterRecord, LocationId, LocationRecord, Mood};

pub(super) fn records() -> (Vec<LocationRecord>, Vec<CharacterRecord>, LocationId) {
    let locations = vec![
        LocationRecord::new(
            "village_center",
            "Village Center",
            "You stand at the heart of a quiet little village. An old stone well sits in the \
             middle of the square, ringed by a few plain houses. A light breeze carries the \
             scent of the distant hills.",
        )
        .with_exit("north", "forest_entrance")
        .with_exit("east", "village_shop")
        .with_exit("west", "village_house")
        .with_exit("south", "river_bank")
        .with_character("elder"),
        LocationRecord::new(
            "forest_entrance",
            "Forest Entrance",
            "A dense forest opens before you. Tall trees blot out the sky and sunlight falls \
             through the leaves in shifting patches. The air smells of earth and fresh grass.",
        )
        .with_exit("south", "village_center")
        .with_exit("north", "deep_forest")
        .with_character("traveler"),
        LocationRecord::new(
            "deep_forest",
            "Deep Forest",
            "The deeper you go the darker it becomes. Ancient trees seem to whisper among \
             themselves and strange sounds drift from somewhere far off. Danger and \
             opportunity both wait here.",
        )
        .with_exit("south", "forest_entrance"),
        LocationRecord::new(
            "village_shop",
            "Village Shop",
            "A cosy little shop. The shelves are packed with everyday goods and adventuring \
             supplies, and the shopkeeper is always glad to help.",
        )
        .with_exit("west", "village_center")
        .with_character("shopkeeper"),
        LocationRecord::new(
            "village_house",
            "Village House",
            "A typical village home with timber walls and a thatched roof. Simple, but kept \
             neat and tidy by its hard-working owner.",
        )
        .with_exit("east", "village_center")
        .with_character("villager"),
        LocationRecord::new(
            "river_bank",
            "River Bank",
            "A clear stream flows gently past, mirroring the blue of the sky. Reeds and wild \
             flowers line the bank, and now and then a small fish leaps from the water.",
        )
        .with_exit("north", "village_center")
        .with_character("fisherman"),
    ];

    let characters = vec![
        CharacterRecord::new(
            "elder",
            "Village Elder",
            "A wise and kindly old man who knows the village's history inside out. He is \
             always happy to offer advice and guidance to young adventurers, and speaks \
             gently but with a philosophical turn.",
        )
        .with_base_mood(Mood::Friendly)
        .with_fallback(
            "Young adventurer, I heard you say '{message}'. The village's wisdom tells us \
             that every exchange is a chance to learn.",
        ),
        CharacterRecord::new(
            "shopkeeper",
            "Shopkeeper",
            "A shrewd but honest merchant who knows every item and price. Enjoys chatting \
             with customers and always has useful information. Speaks plainly but kindly.",
        )
        .with_base_mood(Mood::Friendly)
        .with_fallback(
            "Welcome, welcome! About '{message}', I think I may have something useful for you.",
        ),
        CharacterRecord::new(
            "traveler",
            "Mysterious Traveler",
            "A traveler from distant lands who has seen much and knows many secrets of the \
             outside world. Every word carries a hint of mystery.",
        )
        .with_base_mood(Mood::Curious)
        .with_fallback("Interesting... '{message}' reminds me of legends from far away..."),
        CharacterRecord::new(
            "villager",
            "Villager",
            "A plain-spoken villager who knows village life well. Hard-working and kind, but \
             a little wary of outsiders.",
        )
        .with_base_mood(Mood::Neutral)
        .with_fallback("Oh, '{message}'? That reminds me of something that happened in the village."),
        CharacterRecord::new(
            "fisherman",
            "Fisherman",
            "A quiet fisherman who likes to fish alone by the river. Knows the river and the \
             surrounding nature well, and speaks briefly but wisely.",
        )
        .with_base_mood(Mood::Friendly)
        .with_fallback("Hmm... '{message}'... words have their currents, just like the river."),
    ];

    (locations, characters, LocationId::from("village_center"))
}
