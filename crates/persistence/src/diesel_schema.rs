// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    notices (id) {
        id -> Text,
        restaurant_id -> BigInt,
        status -> Text,
        payload -> Text,
        created_at -> Text,
        updated_at -> Text,
        rejected_at -> Nullable<Text>,
    }
}
