diesel::table! {
    measurement (id) {
        id -> Integer,
        station -> Text,
        date -> Text,
        prcp -> Nullable<Double>,
        tobs -> Double,
    }
}

diesel::table! {
    station (id) {
        id -> Integer,
        #[sql_name = "station"]
        station_code -> Text,
        name -> Text,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
        elevation -> Nullable<Double>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(measurement, station);
